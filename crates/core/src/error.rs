//! Error types for the tafsir assistant.
//!
//! This module defines a unified error enum that covers all error
//! categories in the application: configuration, I/O, embedding,
//! vector-store, and generation errors.

use thiserror::Error;

/// Unified error type for the tafsir assistant.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated. At the
/// pipeline boundary every error is flattened into a marked answer string
/// so the caller can render all outcomes uniformly.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Embedding backend errors. Fatal for the current query.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector store connectivity or query errors.
    ///
    /// Kept distinct from an empty search result: an unreachable store
    /// must surface as a fault, not as "no evidence".
    #[error("Vector store error: {0}")]
    Store(String),

    /// Generation API errors (network, non-2xx, malformed response)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Generation API returned HTTP 429. Transient; recovered locally
    /// via bounded retry with jittered backoff.
    #[error("LLM rate limited (HTTP 429)")]
    RateLimited,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_is_distinguishable() {
        let err = AppError::RateLimited;
        assert!(matches!(err, AppError::RateLimited));
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_store_error_display() {
        let err = AppError::Store("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
