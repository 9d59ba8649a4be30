//! Query-time retrieval.
//!
//! Embeds the query, asks the vector store for the top-k nearest
//! chunks, and drops everything under the minimum similarity score.
//! Order is preserved from the store, so the output stays sorted by
//! descending score.

use crate::embedder::Embedder;
use crate::store::VectorStore;
use crate::types::ScoredCandidate;
use std::sync::Arc;
use tafsir_core::{AppError, AppResult};

/// Retrieves scored chunks for a query.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Retrieve up to `top_k` chunks scoring at least `min_score`.
    ///
    /// An empty result is a legitimate outcome (nothing similar enough);
    /// embedding and store faults propagate as errors.
    pub async fn retrieve(
        &self,
        query_text: &str,
        top_k: usize,
        min_score: f32,
    ) -> AppResult<Vec<ScoredCandidate>> {
        if query_text.trim().is_empty() {
            return Err(AppError::Config("Query text cannot be empty".to_string()));
        }

        let vector = self.embedder.embed(query_text).await?;
        let candidates = self.store.query(&vector, top_k).await?;

        let fetched = candidates.len();
        let kept: Vec<ScoredCandidate> = candidates
            .into_iter()
            .filter(|c| c.score >= min_score)
            .collect();

        tracing::debug!(
            "Retrieved {} candidates, {} at or above score {:.2}",
            fetched,
            kept.len(),
            min_score
        );

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::Embedder;
    use crate::store::MemoryStore;
    use crate::types::{Chunk, SourceType};

    struct FixedEmbedder {
        vector: Vec<f32>,
    }

    #[async_trait::async_trait]
    impl Embedder for FixedEmbedder {
        fn provider_name(&self) -> &str {
            "fixed"
        }
        fn model_name(&self) -> &str {
            "fixed"
        }
        fn dimensions(&self) -> usize {
            self.vector.len()
        }
        async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
            if text.trim().is_empty() {
                return Err(AppError::Embedding("Cannot embed empty text".to_string()));
            }
            Ok(self.vector.clone())
        }
    }

    struct FailingEmbedder;

    #[async_trait::async_trait]
    impl Embedder for FailingEmbedder {
        fn provider_name(&self) -> &str {
            "failing"
        }
        fn model_name(&self) -> &str {
            "failing"
        }
        fn dimensions(&self) -> usize {
            3
        }
        async fn embed(&self, _text: &str) -> AppResult<Vec<f32>> {
            Err(AppError::Embedding("backend unavailable".to_string()))
        }
    }

    fn chunk(id: &str, embedding: Vec<f32>) -> Chunk {
        Chunk {
            id: id.to_string(),
            text: format!("text {}", id),
            source_type: SourceType::Commentary,
            ayat_number: 1,
            surah_name: "Al-Lahab".to_string(),
            surah_number: 111,
            embedding,
        }
    }

    fn retriever_over(chunks: Vec<Chunk>) -> Retriever {
        Retriever::new(
            Arc::new(FixedEmbedder {
                vector: vec![1.0, 0.0, 0.0],
            }),
            Arc::new(MemoryStore::from_chunks(chunks)),
        )
    }

    #[tokio::test]
    async fn test_threshold_drops_low_scores() {
        let retriever = retriever_over(vec![
            chunk("aligned", vec![1.0, 0.0, 0.0]),
            chunk("orthogonal", vec![0.0, 1.0, 0.0]),
        ]);

        let results = retriever.retrieve("query", 10, 0.5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "aligned");
        assert!(results.iter().all(|c| c.score >= 0.5));
    }

    #[tokio::test]
    async fn test_results_stay_in_descending_order() {
        let retriever = retriever_over(vec![
            chunk("mid", vec![0.7, 0.7, 0.0]),
            chunk("best", vec![1.0, 0.0, 0.0]),
            chunk("worst", vec![0.2, 1.0, 0.0]),
        ]);

        let results = retriever.retrieve("query", 10, 0.0).await.unwrap();
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_nothing_above_threshold_is_ok_empty() {
        let retriever = retriever_over(vec![chunk("orthogonal", vec![0.0, 1.0, 0.0])]);
        let results = retriever.retrieve("query", 10, 0.9).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let retriever = retriever_over(vec![]);
        let result = retriever.retrieve("   ", 10, 0.5).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let retriever = Retriever::new(
            Arc::new(FailingEmbedder),
            Arc::new(MemoryStore::new()),
        );
        let result = retriever.retrieve("query", 10, 0.5).await;
        assert!(matches!(result, Err(AppError::Embedding(_))));
    }
}
