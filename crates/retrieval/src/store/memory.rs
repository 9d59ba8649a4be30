//! In-memory vector store.
//!
//! Brute-force cosine similarity over a chunk list. Used by tests and
//! small local corpora; the ranking contract (descending score, stable
//! on ties) matches the production store.

use crate::chunking::{chunk_words, DEFAULT_MAX_WORDS, DEFAULT_OVERLAP_WORDS};
use crate::embedder::Embedder;
use crate::store::VectorStore;
use crate::types::{Chunk, ScoredCandidate, SourceType};
use serde::Deserialize;
use std::path::Path;
use tafsir_core::{AppError, AppResult};

/// One verse record in a local corpus file.
#[derive(Debug, Deserialize)]
struct CorpusRecord {
    surah_name: String,
    surah_number: u32,
    ayat_number: u32,
    source: String,
    text: String,
}

/// Brute-force in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    chunks: Vec<Chunk>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// Add a chunk to the store.
    pub fn insert(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Load a local corpus from a JSON array of verse records, chunking
    /// each text into word windows and embedding every chunk.
    ///
    /// Record shape: `{surah_name, surah_number, ayat_number, source,
    /// text}`. Long texts produce several chunks sharing the verse
    /// reference, each with its own id suffix.
    pub async fn load_corpus(path: &Path, embedder: &dyn Embedder) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<CorpusRecord> = serde_json::from_str(&content)?;

        let mut store = Self::new();
        for record in &records {
            let source_type = SourceType::parse(&record.source).ok_or_else(|| {
                AppError::Store(format!(
                    "Unknown source type in corpus record for {} {}: '{}'",
                    record.surah_name, record.ayat_number, record.source
                ))
            })?;

            let windows = chunk_words(&record.text, DEFAULT_MAX_WORDS, DEFAULT_OVERLAP_WORDS)?;
            for (i, window) in windows.iter().enumerate() {
                store.insert(Chunk {
                    id: format!(
                        "{}:{}:{}:{}",
                        record.surah_number, record.ayat_number, record.source, i
                    ),
                    text: window.clone(),
                    source_type,
                    ayat_number: record.ayat_number,
                    surah_name: record.surah_name.clone(),
                    surah_number: record.surah_number,
                    embedding: embedder.embed(window).await?,
                });
            }
        }

        tracing::info!(
            "Loaded {} chunks from {} corpus records",
            store.len(),
            records.len()
        );

        Ok(store)
    }
}

/// Cosine similarity between two vectors of equal length.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[async_trait::async_trait]
impl VectorStore for MemoryStore {
    async fn query(&self, vector: &[f32], top_k: usize) -> AppResult<Vec<ScoredCandidate>> {
        let mut scored: Vec<ScoredCandidate> = self
            .chunks
            .iter()
            .map(|chunk| ScoredCandidate::from_chunk(chunk, cosine_similarity(vector, &chunk.embedding)))
            .collect();

        // Stable sort keeps insertion order on score ties
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored)
    }
}
