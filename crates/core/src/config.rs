//! Configuration management for the tafsir assistant.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Built-in defaults
//! - Config files (tafsir.yaml)
//! - Environment variables (`TAFSIR_*`)
//! - Command-line flags
//!
//! The resulting `AppConfig` is immutable and passed into each component
//! at construction: thresholds, retry bounds, and the keyword-to-source
//! tables all live here rather than in module-level constants.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Retrieval parameters
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Embedding backend configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Vector store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Generation API configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Keyword tables for content-type hint detection
    #[serde(default)]
    pub keywords: KeywordConfig,
}

/// Parameters for the retrieval stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of nearest chunks requested from the vector store
    #[serde(rename = "topK")]
    pub top_k: u32,

    /// Minimum similarity score for a chunk to count as evidence (0.0-1.0)
    #[serde(rename = "minScore")]
    pub min_score: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            min_score: 0.6,
        }
    }
}

/// Embedding backend configuration.
///
/// The backend is selected once at startup; retrieval logic never
/// branches on which backend produced a vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Backend identifier ("ollama" or "hash")
    pub provider: String,

    /// Model identifier (for backends that load one)
    pub model: String,

    /// Expected embedding dimensions
    pub dimensions: usize,

    /// Optional custom endpoint URL
    pub endpoint: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            endpoint: None,
        }
    }
}

/// Vector store (Neo4j) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the Neo4j HTTP API
    pub endpoint: String,

    /// Database name
    pub database: String,

    /// Name of the vector index holding chunk embeddings
    #[serde(rename = "indexName")]
    pub index_name: String,

    /// Username for basic auth
    pub username: String,

    /// Environment variable holding the password
    #[serde(rename = "passwordEnv")]
    pub password_env: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:7474".to_string(),
            database: "neo4j".to_string(),
            index_name: "chunk_embeddings".to_string(),
            username: "neo4j".to_string(),
            password_env: "TAFSIR_STORE_PASSWORD".to_string(),
        }
    }
}

/// Generation API configuration, including the retry policy for
/// rate-limited calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Provider identifier ("groq")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Chat completions endpoint (OpenAI-compatible)
    pub endpoint: String,

    /// Environment variable holding the API key
    #[serde(rename = "apiKeyEnv")]
    pub api_key_env: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(rename = "maxTokens")]
    pub max_tokens: u32,

    /// Wall-clock ceiling for a single request, in seconds
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,

    /// Maximum attempts when the API rate-limits (HTTP 429)
    #[serde(rename = "maxRetries")]
    pub max_retries: u32,

    /// Base wait between rate-limited attempts, in seconds
    #[serde(rename = "backoffBaseSecs")]
    pub backoff_base_secs: u64,

    /// Lower bound of the random jitter added to the base wait
    #[serde(rename = "jitterMinSecs")]
    pub jitter_min_secs: u64,

    /// Upper bound of the random jitter added to the base wait
    #[serde(rename = "jitterMaxSecs")]
    pub jitter_max_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            timeout_secs: 30,
            max_retries: 5,
            backoff_base_secs: 60,
            jitter_min_secs: 5,
            jitter_max_secs: 15,
        }
    }
}

/// Keyword tables mapping query terms to content-type hints.
///
/// When terms from several classes appear in one query, precedence is
/// fixed: commentary > translation > original text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Terms indicating commentary (tafsir) intent
    pub commentary: Vec<String>,

    /// Terms indicating translation/meaning intent
    pub translation: Vec<String>,

    /// Terms indicating original-text/recitation intent
    #[serde(rename = "originalText")]
    pub original_text: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            commentary: vec![
                "tafsir".to_string(),
                "penjelasan".to_string(),
                "commentary".to_string(),
                "exegesis".to_string(),
            ],
            translation: vec![
                "arti".to_string(),
                "terjemah".to_string(),
                "makna".to_string(),
                "translation".to_string(),
                "meaning".to_string(),
            ],
            original_text: vec![
                "bacaan".to_string(),
                "lafal".to_string(),
                "lafadz".to_string(),
                "recitation".to_string(),
                "arabic".to_string(),
            ],
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    retrieval: Option<RetrievalConfig>,
    embedding: Option<EmbeddingConfig>,
    store: Option<StoreConfig>,
    generation: Option<GenerationConfig>,
    keywords: Option<KeywordConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
            retrieval: RetrievalConfig::default(),
            embedding: EmbeddingConfig::default(),
            store: StoreConfig::default(),
            generation: GenerationConfig::default(),
            keywords: KeywordConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional YAML file, and
    /// environment variables.
    ///
    /// The config file is resolved in order: the explicit `config_file`
    /// argument (the CLI flag), the `TAFSIR_CONFIG` environment
    /// variable, then `tafsir.yaml` in the working directory if present.
    ///
    /// Environment variables:
    /// - `TAFSIR_CONFIG`: Path to config file
    /// - `TAFSIR_MODEL`: Generation model identifier
    /// - `TAFSIR_STORE_URL`: Vector store endpoint
    /// - `TAFSIR_EMBEDDING_PROVIDER`: Embedding backend
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        config.config_file = config_file.or_else(|| {
            std::env::var("TAFSIR_CONFIG").ok().map(PathBuf::from)
        });

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            Some(cf.clone())
        } else {
            let default_path = PathBuf::from("tafsir.yaml");
            default_path.exists().then_some(default_path)
        };

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {:?}",
                    path
                )));
            }
            config = config.merge_yaml(&path)?;
        }

        // Environment variables override YAML config
        if let Ok(model) = std::env::var("TAFSIR_MODEL") {
            config.generation.model = model;
        }

        if let Ok(endpoint) = std::env::var("TAFSIR_STORE_URL") {
            config.store.endpoint = endpoint;
        }

        if let Ok(provider) = std::env::var("TAFSIR_EMBEDDING_PROVIDER") {
            config.embedding.provider = provider;
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(retrieval) = config_file.retrieval {
            result.retrieval = retrieval;
        }
        if let Some(embedding) = config_file.embedding {
            result.embedding = embedding;
        }
        if let Some(store) = config_file.store {
            result.store = store;
        }
        if let Some(generation) = config_file.generation {
            result.generation = generation;
        }
        if let Some(keywords) = config_file.keywords {
            result.keywords = keywords;
        }
        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and files.
    pub fn with_overrides(
        mut self,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(model) = model {
            self.generation.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve the generation API key from the configured environment
    /// variable.
    pub fn resolve_api_key(&self) -> AppResult<String> {
        std::env::var(&self.generation.api_key_env).map_err(|_| {
            AppError::Config(format!(
                "API key not found in environment variable: {}",
                self.generation.api_key_env
            ))
        })
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> AppResult<()> {
        if self.retrieval.top_k == 0 {
            return Err(AppError::Config("topK must be positive".to_string()));
        }

        if !(0.0..=1.0).contains(&self.retrieval.min_score) {
            return Err(AppError::Config(format!(
                "minScore must be within [0.0, 1.0], got {}",
                self.retrieval.min_score
            )));
        }

        if self.generation.jitter_min_secs > self.generation.jitter_max_secs {
            return Err(AppError::Config(
                "jitterMinSecs must not exceed jitterMaxSecs".to_string(),
            ));
        }

        let known_providers = ["ollama", "hash"];
        if !known_providers.contains(&self.embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding.provider,
                known_providers.join(", ")
            )));
        }

        Ok(())
    }
}
