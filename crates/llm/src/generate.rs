//! Answer generation with bounded, jittered retry.
//!
//! The generator sends a prepared prompt to the chat client and resolves
//! every outcome to a returned string. Rate limiting (HTTP 429) is
//! retried up to a fixed bound with a base wait plus random jitter, so
//! concurrent callers sharing a rate limit do not retry in lockstep.
//! Any other failure returns a degraded-service message immediately.

use crate::client::{ChatClient, ChatMessage, ChatRequest};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tafsir_core::config::GenerationConfig;
use tafsir_core::{AppError, DEGRADED_MARKER};

/// Pluggable delay function for retry waits.
///
/// Production uses the tokio timer; tests inject a zero-delay recorder
/// to assert retry counts without wall-clock waits.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Tokio-backed sleeper.
pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Generates answers from a prepared prompt.
///
/// Never raises to the caller: all failure paths resolve to a returned
/// string carrying the degraded-service marker prefix.
pub struct AnswerGenerator {
    client: Arc<dyn ChatClient>,
    config: GenerationConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl AnswerGenerator {
    /// Create a generator with the production sleeper.
    pub fn new(client: Arc<dyn ChatClient>, config: GenerationConfig) -> Self {
        Self {
            client,
            config,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the sleeper (test seam).
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// The fixed degraded-service message.
    pub fn degraded_message() -> String {
        format!(
            "{} Failed to get a response from the AI service.",
            DEGRADED_MARKER
        )
    }

    /// Send the prompt and return generated text, or a degraded message.
    pub async fn generate(&self, prompt: &str) -> String {
        let request = ChatRequest::new(&self.config.model)
            .with_message(ChatMessage::user(prompt))
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        let max_attempts = self.config.max_retries.max(1);

        for attempt in 1..=max_attempts {
            match self.client.complete(&request).await {
                Ok(response) => {
                    tracing::info!(
                        "Generation succeeded on attempt {} ({} tokens)",
                        attempt,
                        response.usage.total_tokens
                    );
                    return response.content;
                }
                Err(AppError::RateLimited) => {
                    if attempt == max_attempts {
                        tracing::error!(
                            "Generation rate limited on all {} attempts, giving up",
                            max_attempts
                        );
                        break;
                    }

                    let wait = self.retry_wait();
                    tracing::warn!(
                        "Rate limited (429), waiting {:?} before attempt {}/{}",
                        wait,
                        attempt + 1,
                        max_attempts
                    );
                    self.sleeper.sleep(wait).await;
                }
                Err(e) => {
                    // Network errors, non-2xx, malformed bodies: no retry
                    tracing::error!("Generation failed: {}", e);
                    return Self::degraded_message();
                }
            }
        }

        Self::degraded_message()
    }

    /// Compute the wait for the next attempt: base plus random jitter.
    fn retry_wait(&self) -> Duration {
        let jitter = {
            let mut rng = rand::thread_rng();
            rng.gen_range(self.config.jitter_min_secs..=self.config.jitter_max_secs)
        };
        Duration::from_secs(self.config.backoff_base_secs + jitter)
    }
}
