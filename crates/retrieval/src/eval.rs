//! Retrieval quality evaluation.
//!
//! Scores the retriever against a ground-truth file mapping queries to
//! the verse references that should be retrieved. Metrics are the usual
//! ranked-retrieval trio: Precision@k, Recall, and MRR (reciprocal rank
//! of the first relevant hit).

use crate::retriever::Retriever;
use crate::types::{surah_key, ScoredCandidate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tafsir_core::{AppError, AppResult};

/// A verse reference in the ground-truth file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevantVerse {
    pub surah: String,
    pub ayat: u32,
}

/// One labelled evaluation query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTruthEntry {
    pub query: String,
    pub relevant: Vec<RelevantVerse>,
}

/// Per-query metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueryMetrics {
    pub precision: f64,
    pub recall: f64,
    pub mrr: f64,
}

/// Aggregated report over all queries.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub queries: usize,
    pub mean_precision: f64,
    pub mean_recall: f64,
    pub mean_mrr: f64,
}

/// Comparison key for a verse reference. Spacing, casing, and apostrophe
/// style differ between ground-truth files and the corpus, so all three
/// are stripped.
pub fn normalize_key(surah: &str, ayat: u32) -> String {
    let name: String = surah_key(surah).chars().filter(|c| *c != ' ').collect();
    format!("{}:{}", name, ayat)
}

/// Load ground truth from a JSON array of `{query, relevant}` entries.
pub fn load_ground_truth(path: &Path) -> AppResult<Vec<GroundTruthEntry>> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<GroundTruthEntry> = serde_json::from_str(&content)?;
    if entries.is_empty() {
        return Err(AppError::Config(format!(
            "Ground-truth file has no entries: {}",
            path.display()
        )));
    }
    Ok(entries)
}

/// Score one query's retrieved list against its relevant set.
pub fn evaluate_query(
    retrieved: &[ScoredCandidate],
    relevant: &[RelevantVerse],
    k: usize,
) -> QueryMetrics {
    let relevant_keys: HashSet<String> = relevant
        .iter()
        .map(|v| normalize_key(&v.surah, v.ayat))
        .collect();

    if relevant_keys.is_empty() {
        return QueryMetrics {
            precision: 0.0,
            recall: 0.0,
            mrr: 0.0,
        };
    }

    let top_k: Vec<String> = retrieved
        .iter()
        .take(k)
        .map(|c| normalize_key(&c.surah_name, c.ayat_number))
        .collect();

    let hits = top_k.iter().filter(|key| relevant_keys.contains(*key)).count();

    // Distinct relevant verses found anywhere in the top-k
    let found: HashSet<&String> = top_k.iter().filter(|key| relevant_keys.contains(*key)).collect();

    let mrr = top_k
        .iter()
        .position(|key| relevant_keys.contains(key))
        .map(|rank| 1.0 / (rank as f64 + 1.0))
        .unwrap_or(0.0);

    QueryMetrics {
        precision: hits as f64 / k.max(1) as f64,
        recall: found.len() as f64 / relevant_keys.len() as f64,
        mrr,
    }
}

/// Run every ground-truth query through the retriever and average the
/// per-query metrics.
pub async fn evaluate(
    retriever: &Retriever,
    entries: &[GroundTruthEntry],
    k: usize,
    min_score: f32,
) -> AppResult<EvalReport> {
    if entries.is_empty() {
        return Err(AppError::Config("No evaluation queries".to_string()));
    }

    let mut sum = QueryMetrics {
        precision: 0.0,
        recall: 0.0,
        mrr: 0.0,
    };

    for entry in entries {
        let retrieved = retriever.retrieve(&entry.query, k, min_score).await?;
        let metrics = evaluate_query(&retrieved, &entry.relevant, k);

        tracing::debug!(
            "Eval '{}': P@{}={:.2} R={:.2} MRR={:.2}",
            entry.query,
            k,
            metrics.precision,
            metrics.recall,
            metrics.mrr
        );

        sum.precision += metrics.precision;
        sum.recall += metrics.recall;
        sum.mrr += metrics.mrr;
    }

    let n = entries.len() as f64;
    Ok(EvalReport {
        queries: entries.len(),
        mean_precision: sum.precision / n,
        mean_recall: sum.recall / n,
        mean_mrr: sum.mrr / n,
    })
}
