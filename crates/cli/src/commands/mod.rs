//! Command handlers for the tafsir CLI.

pub mod ask;
pub mod chat;
pub mod eval;

pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use eval::EvalCommand;

use std::sync::Arc;
use tafsir_core::{config::AppConfig, AppResult};
use tafsir_llm::{create_client, AnswerGenerator};
use tafsir_retrieval::{create_embedder, Neo4jVectorStore, Pipeline, Retriever};

/// Wire up the retriever from configuration.
pub(crate) fn build_retriever(config: &AppConfig) -> AppResult<Retriever> {
    let embedder = create_embedder(&config.embedding)?;
    let store = Neo4jVectorStore::new(&config.store)?;
    Ok(Retriever::new(embedder, Arc::new(store)))
}

/// Wire up the full answering pipeline from configuration.
pub(crate) fn build_pipeline(config: &AppConfig) -> AppResult<Pipeline> {
    let retriever = build_retriever(config)?;

    let api_key = config.resolve_api_key()?;
    let client = create_client(&config.generation, &api_key)?;
    let generator = AnswerGenerator::new(client, config.generation.clone());

    Ok(Pipeline::new(
        retriever,
        generator,
        config.keywords.clone(),
        config.retrieval.top_k as usize,
        config.retrieval.min_score,
    ))
}
