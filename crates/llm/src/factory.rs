//! Chat client factory.
//!
//! Creates a chat client from the generation configuration. Provider
//! resolution happens once at startup; nothing downstream branches on
//! provider identity.

use crate::client::ChatClient;
use crate::providers::GroqClient;
use std::sync::Arc;
use tafsir_core::config::GenerationConfig;
use tafsir_core::{AppError, AppResult};

/// Create a chat client for the configured provider.
///
/// # Errors
/// Returns an error if the provider is unknown or client
/// initialization fails.
pub fn create_client(config: &GenerationConfig, api_key: &str) -> AppResult<Arc<dyn ChatClient>> {
    match config.provider.to_lowercase().as_str() {
        "groq" => {
            let client = GroqClient::new(&config.endpoint, api_key, config.timeout_secs)?;
            Ok(Arc::new(client))
        }
        other => Err(AppError::Config(format!(
            "Unknown generation provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_groq_client() {
        let config = GenerationConfig::default();
        let client = create_client(&config, "test-key");
        assert!(client.is_ok());
        assert_eq!(client.unwrap().provider_name(), "groq");
    }

    #[test]
    fn test_unknown_provider() {
        let mut config = GenerationConfig::default();
        config.provider = "unknown".to_string();

        match create_client(&config, "test-key") {
            Err(AppError::Config(msg)) => assert!(msg.contains("Unknown generation provider")),
            _ => panic!("Expected config error for unknown provider"),
        }
    }
}
