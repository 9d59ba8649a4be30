//! Neo4j vector index backend.
//!
//! Queries a Neo4j vector index through the HTTP transaction API. One
//! Cypher call per query: `db.index.vector.queryNodes` returns the
//! nearest chunk nodes with similarity scores already sorted.

use crate::store::VectorStore;
use crate::types::{ScoredCandidate, SourceType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tafsir_core::config::StoreConfig;
use tafsir_core::{AppError, AppResult};

const QUERY_CYPHER: &str = "CALL db.index.vector.queryNodes($index_name, $top_k, $query_vector) \
     YIELD node, score \
     RETURN node.id AS id, node.text AS text, node.source AS source, \
            node.ayat_number AS ayat_number, node.surah_name AS surah_name, \
            node.surah_number AS surah_number, score \
     ORDER BY score DESC";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct TxRequest<'a> {
    statements: Vec<TxStatement<'a>>,
}

#[derive(Debug, Serialize)]
struct TxStatement<'a> {
    statement: &'a str,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    results: Vec<TxResult>,
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// Neo4j vector index backend.
#[derive(Debug, Clone)]
pub struct Neo4jVectorStore {
    client: reqwest::Client,
    endpoint: String,
    database: String,
    index_name: String,
    username: String,
    password: Option<String>,
}

impl Neo4jVectorStore {
    /// Create a store client from configuration. The password comes from
    /// the environment variable named in `password_env`; when unset the
    /// request goes out unauthenticated.
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Store(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            database: config.database.clone(),
            index_name: config.index_name.clone(),
            username: config.username.clone(),
            password: std::env::var(&config.password_env).ok(),
        })
    }

    fn commit_url(&self) -> String {
        format!("{}/db/{}/tx/commit", self.endpoint, self.database)
    }

    fn parse_row(row: &[Value]) -> AppResult<ScoredCandidate> {
        if row.len() != 7 {
            return Err(AppError::Store(format!(
                "Unexpected row shape from vector index: {} columns",
                row.len()
            )));
        }

        let as_str = |v: &Value, field: &str| -> AppResult<String> {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| AppError::Store(format!("Field '{}' is not a string", field)))
        };
        let as_u32 = |v: &Value, field: &str| -> AppResult<u32> {
            v.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    AppError::Store(format!("Field '{}' is not a valid integer", field))
                })
        };

        let source = as_str(&row[2], "source")?;
        let source_type = SourceType::parse(&source)
            .ok_or_else(|| AppError::Store(format!("Unknown source type: '{}'", source)))?;

        let score = row[6]
            .as_f64()
            .ok_or_else(|| AppError::Store("Field 'score' is not a number".to_string()))?;

        Ok(ScoredCandidate {
            id: as_str(&row[0], "id")?,
            text: as_str(&row[1], "text")?,
            source_type,
            ayat_number: as_u32(&row[3], "ayat_number")?,
            surah_name: as_str(&row[4], "surah_name")?,
            surah_number: as_u32(&row[5], "surah_number")?,
            score: score as f32,
        })
    }
}

#[async_trait::async_trait]
impl VectorStore for Neo4jVectorStore {
    async fn query(&self, vector: &[f32], top_k: usize) -> AppResult<Vec<ScoredCandidate>> {
        let request = TxRequest {
            statements: vec![TxStatement {
                statement: QUERY_CYPHER,
                parameters: serde_json::json!({
                    "index_name": self.index_name,
                    "top_k": top_k,
                    "query_vector": vector,
                }),
            }],
        };

        let mut builder = self.client.post(self.commit_url()).json(&request);
        if let Some(password) = &self.password {
            builder = builder.basic_auth(&self.username, Some(password));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Failed to reach vector store: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Store(format!(
                "Vector store returned {}: {}",
                status, error_text
            )));
        }

        let body: TxResponse = response
            .json()
            .await
            .map_err(|e| AppError::Store(format!("Failed to parse store response: {}", e)))?;

        if let Some(err) = body.errors.first() {
            return Err(AppError::Store(format!(
                "Vector index query failed ({}): {}",
                err.code, err.message
            )));
        }

        let result = body
            .results
            .first()
            .ok_or_else(|| AppError::Store("Store response contained no result set".to_string()))?;

        let candidates = result
            .data
            .iter()
            .map(|row| Self::parse_row(&row.row))
            .collect::<AppResult<Vec<_>>>()?;

        tracing::debug!(
            "Vector index '{}' returned {} candidates",
            self.index_name,
            candidates.len()
        );

        Ok(candidates)
    }
}
