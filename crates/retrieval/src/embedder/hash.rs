//! Deterministic hashing embedder.
//!
//! Maps word and character-trigram hashes onto vector dimensions and
//! normalizes to a unit vector. No model download, no network: suitable
//! for tests and offline corpora. Not a semantic model — similar texts
//! score high through shared tokens, not meaning.

use crate::embedder::Embedder;
use tafsir_core::{AppError, AppResult};

/// Hashing embedding backend.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let dim = self.dimensions;
        let mut embedding = vec![0.0f32; dim];

        let lower = text.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().filter(|w| w.len() > 1).collect();

        let mut word_freq = std::collections::HashMap::new();
        for word in &words {
            *word_freq.entry(*word).or_insert(0u32) += 1;
        }

        for (word, freq) in &word_freq {
            // Character trigrams spread each word over several dimensions
            let chars: Vec<char> = word.chars().collect();
            for i in 0..chars.len().saturating_sub(2) {
                let trigram = format!("{}{}{}", chars[i], chars[i + 1], chars[i + 2]);
                let trigram_hash = trigram
                    .bytes()
                    .fold(0u64, |acc, b| acc.wrapping_mul(37).wrapping_add(b as u64));
                let dim_idx = (trigram_hash as usize) % dim;
                embedding[dim_idx] += (*freq as f32).sqrt();
            }

            let word_hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            embedding[(word_hash as usize) % dim] += *freq as f32;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

#[async_trait::async_trait]
impl Embedder for HashEmbedder {
    fn provider_name(&self) -> &str {
        "hash"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(AppError::Embedding("Cannot embed empty text".to_string()));
        }
        Ok(self.embed_sync(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedding_has_configured_dimension() {
        let embedder = HashEmbedder::new(128);
        let embedding = embedder.embed("surat al-fatihah ayat 1").await.unwrap();
        assert_eq!(embedding.len(), 128);
    }

    #[tokio::test]
    async fn test_embedding_is_unit_normalized() {
        let embedder = HashEmbedder::new(64);
        let embedding = embedder.embed("some query text").await.unwrap();
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_embedding_is_deterministic() {
        let embedder = HashEmbedder::new(64);
        let a = embedder.embed("tafsir surat al-lahab").await.unwrap();
        let b = embedder.embed("tafsir surat al-lahab").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let embedder = HashEmbedder::new(64);
        let result = embedder.embed("   ").await;
        assert!(matches!(result, Err(AppError::Embedding(_))));
    }

    #[tokio::test]
    async fn test_different_texts_differ() {
        let embedder = HashEmbedder::new(256);
        let a = embedder.embed("patience and prayer").await.unwrap();
        let b = embedder.embed("riba and trade").await.unwrap();
        assert_ne!(a, b);
    }
}
