//! Vector store boundary.
//!
//! The store is treated as an opaque k-NN oracle: given a query vector
//! and a count, it returns the nearest stored chunks with similarity
//! scores, pre-sorted by descending score. An empty result is valid;
//! connectivity failures are faults and must propagate.

pub mod memory;
pub mod neo4j;

use crate::types::ScoredCandidate;
use tafsir_core::AppResult;

pub use memory::MemoryStore;
pub use neo4j::Neo4jVectorStore;

/// Trait for vector store backends.
#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    /// Return the top-k chunks nearest to the query vector, ordered by
    /// descending similarity score.
    ///
    /// An empty result means no stored chunks, not an error. Store
    /// connectivity problems surface as `AppError::Store`.
    async fn query(&self, vector: &[f32], top_k: usize) -> AppResult<Vec<ScoredCandidate>>;
}
