//! Retrieval-augmented answering over a tafsir corpus.
//!
//! The pipeline embeds a question, pulls the nearest chunks from the
//! vector store, narrows them with hints parsed from the question
//! itself, and feeds the surviving evidence to the generation model.
//! All failure paths flatten to marker-prefixed strings so callers can
//! always print the result.

pub mod chunking;
pub mod context;
pub mod embedder;
pub mod eval;
pub mod reference;
pub mod retriever;
pub mod selector;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

use tafsir_core::config::KeywordConfig;
use tafsir_core::{AppResult, ERROR_MARKER};
use tafsir_llm::AnswerGenerator;
use tafsir_prompt::build_answer_prompt;

pub use embedder::{create_embedder, Embedder};
pub use retriever::Retriever;
pub use store::{MemoryStore, Neo4jVectorStore, VectorStore};
pub use types::{Chunk, EvidenceSet, QueryHints, ScoredCandidate, SourceType};

/// End-to-end question answering pipeline.
pub struct Pipeline {
    retriever: Retriever,
    generator: AnswerGenerator,
    keywords: KeywordConfig,
    top_k: usize,
    min_score: f32,
}

impl Pipeline {
    pub fn new(
        retriever: Retriever,
        generator: AnswerGenerator,
        keywords: KeywordConfig,
        top_k: usize,
        min_score: f32,
    ) -> Self {
        Self {
            retriever,
            generator,
            keywords,
            top_k,
            min_score,
        }
    }

    /// Marker string returned when no evidence survives selection.
    pub fn no_evidence_message() -> String {
        format!(
            "{} No relevant passage was found for this question.",
            ERROR_MARKER
        )
    }

    /// Retrieve and select evidence for a query without generating.
    ///
    /// Exposed separately so callers can inspect what the answer would
    /// be grounded on.
    pub async fn evidence(&self, query_text: &str) -> AppResult<EvidenceSet> {
        let candidates = self
            .retriever
            .retrieve(query_text, self.top_k, self.min_score)
            .await?;
        let hints = reference::extract(query_text, &self.keywords);
        Ok(selector::select(&candidates, &hints))
    }

    /// Answer a question. Never fails: retrieval faults and generation
    /// failures come back as marker-prefixed strings.
    pub async fn answer(&self, query_text: &str) -> String {
        let evidence = match self.evidence(query_text).await {
            Ok(evidence) => evidence,
            Err(e) => {
                tracing::warn!("Retrieval failed: {}", e);
                return format!("{} Retrieval failed: {}", ERROR_MARKER, e);
            }
        };

        if evidence.is_empty() {
            tracing::info!("No evidence for query, skipping generation");
            return Self::no_evidence_message();
        }

        let context = context::format_evidence(&evidence);
        let prompt = match build_answer_prompt(&context, query_text) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!("Prompt rendering failed: {}", e);
                return format!("{} Failed to build the prompt: {}", ERROR_MARKER, e);
            }
        };

        self.generator.generate(&prompt).await
    }
}
