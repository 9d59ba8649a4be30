//! Embedding backends.
//!
//! One polymorphic `Embedder` capability with interchangeable
//! implementations, selected once at startup. Retrieval logic never
//! branches on which backend produced a vector.

pub mod hash;
pub mod ollama;

use std::sync::Arc;
use tafsir_core::config::EmbeddingConfig;
use tafsir_core::{AppError, AppResult};

pub use hash::HashEmbedder;
pub use ollama::OllamaEmbedder;

/// Trait for embedding backends: text in, fixed-dimension vector out.
#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    /// Get backend name (e.g., "ollama", "hash")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate an embedding for one text.
    ///
    /// Fails with `AppError::Embedding` on malformed input or backend
    /// failure; the pipeline treats this as fatal for the current query.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

/// Create an embedding backend based on configuration.
pub fn create_embedder(config: &EmbeddingConfig) -> AppResult<Arc<dyn Embedder>> {
    match config.provider.as_str() {
        "ollama" => {
            let embedder = OllamaEmbedder::new(config)?;
            Ok(Arc::new(embedder))
        }

        "hash" => Ok(Arc::new(HashEmbedder::new(config.dimensions))),

        other => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: ollama, hash",
            other
        ))),
    }
}
