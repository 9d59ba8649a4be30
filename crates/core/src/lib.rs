//! Tafsir Assistant Core Library
//!
//! This crate provides the foundational utilities for the tafsir
//! assistant:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Marker prefix for error and no-evidence answers.
///
/// The caller-facing contract is `answer(query) -> String`; a leading
/// marker distinguishes a user-visible error from a normal answer.
pub const ERROR_MARKER: &str = "❌";

/// Marker prefix for degraded-service answers (generation could not
/// complete).
pub const DEGRADED_MARKER: &str = "⚠️";

/// Check whether an answer string is a marked error or degraded response.
pub fn is_marked_answer(answer: &str) -> bool {
    answer.starts_with(ERROR_MARKER) || answer.starts_with(DEGRADED_MARKER)
}
