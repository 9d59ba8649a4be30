//! Generation API integration for the tafsir assistant.
//!
//! Provides the chat client abstraction, the Groq provider, and the
//! answer generator with its bounded-retry policy.

pub mod client;
pub mod factory;
pub mod generate;
pub mod providers;

pub use client::{ChatClient, ChatMessage, ChatRequest, ChatResponse, ChatUsage};
pub use factory::create_client;
pub use generate::{AnswerGenerator, Sleeper, TokioSleeper};
