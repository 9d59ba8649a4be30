//! Word-window chunking.
//!
//! Splits long source text into overlapping word windows so each chunk
//! stays inside the embedding model's effective context. Used by the
//! ingestion side of the corpus; retrieval only consumes the result.

use tafsir_core::{AppError, AppResult};

/// Default window size in words
pub const DEFAULT_MAX_WORDS: usize = 514;

/// Default overlap between consecutive windows
pub const DEFAULT_OVERLAP_WORDS: usize = 50;

/// Split text into word windows of at most `max_words`, each window
/// sharing `overlap` words with its predecessor.
pub fn chunk_words(text: &str, max_words: usize, overlap: usize) -> AppResult<Vec<String>> {
    if max_words == 0 {
        return Err(AppError::Config("Chunk size must be positive".to_string()));
    }
    if overlap >= max_words {
        return Err(AppError::Config(format!(
            "Chunk overlap ({}) must be smaller than chunk size ({})",
            overlap, max_words
        )));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let step = max_words - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = (start + max_words).min(words.len());
        chunks.push(words[start..end].join(" "));
        if end == words.len() {
            break;
        }
        start += step;
    }

    Ok(chunks)
}
