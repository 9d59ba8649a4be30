//! Groq chat completion provider.
//!
//! Groq exposes an OpenAI-compatible chat completions API over HTTPS
//! with bearer-token authentication. HTTP 429 is a recoverable
//! rate-limit signal; all other non-2xx statuses are fatal for the call.

use crate::client::{ChatClient, ChatMessage, ChatRequest, ChatResponse, ChatUsage};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tafsir_core::{AppError, AppResult};

/// Groq API request format (OpenAI chat completions).
#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Groq API response format.
#[derive(Debug, Deserialize)]
struct GroqResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqMessage,
}

#[derive(Debug, Deserialize)]
struct GroqMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// Groq chat client.
pub struct GroqClient {
    /// Chat completions endpoint URL
    endpoint: String,

    /// Bearer token
    api_key: String,

    /// HTTP client with a bounded request timeout
    client: reqwest::Client,
}

impl GroqClient {
    /// Create a new Groq client.
    ///
    /// The timeout bounds the wall-clock wait for a single request; the
    /// retry policy on top of this client is the answer generator's job.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Convert Groq response to ChatResponse.
    fn convert_response(&self, response: GroqResponse, fallback_model: &str) -> AppResult<ChatResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Llm("Groq response contained no choices".to_string()))?;

        let usage = response
            .usage
            .map(|u| ChatUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(ChatResponse {
            content: choice.message.content,
            model: response.model.unwrap_or_else(|| fallback_model.to_string()),
            usage,
        })
    }
}

#[async_trait::async_trait]
impl ChatClient for GroqClient {
    fn provider_name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        tracing::debug!("Sending completion request to Groq (model: {})", request.model);

        let groq_request = GroqRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&groq_request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Groq: {}", e)))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Groq API rate limited (429)");
            return Err(AppError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Groq API error ({}): {}",
                status, error_text
            )));
        }

        let groq_response: GroqResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Groq response: {}", e)))?;

        tracing::debug!("Received completion from Groq");

        self.convert_response(groq_response, &request.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_client_creation() {
        let client = GroqClient::new(
            "https://api.groq.com/openai/v1/chat/completions",
            "test-key",
            30,
        )
        .unwrap();
        assert_eq!(client.provider_name(), "groq");
    }

    #[test]
    fn test_response_conversion() {
        let client = GroqClient::new("http://localhost", "k", 30).unwrap();
        let raw: GroqResponse = serde_json::from_str(
            r#"{
                "model": "llama-3.3-70b-versatile",
                "choices": [{"message": {"role": "assistant", "content": "Answer text"}}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
            }"#,
        )
        .unwrap();

        let response = client.convert_response(raw, "fallback").unwrap();
        assert_eq!(response.content, "Answer text");
        assert_eq!(response.model, "llama-3.3-70b-versatile");
        assert_eq!(response.usage.total_tokens, 15);
    }

    #[test]
    fn test_empty_choices_is_an_error() {
        let client = GroqClient::new("http://localhost", "k", 30).unwrap();
        let raw: GroqResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();

        let result = client.convert_response(raw, "m");
        assert!(result.is_err());
    }
}
