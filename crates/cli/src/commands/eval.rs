//! Eval command handler.
//!
//! Scores retrieval quality against a labelled query file and prints
//! mean Precision@k, Recall, and MRR. Generation is never invoked.

use clap::Args;
use std::path::PathBuf;
use tafsir_core::{config::AppConfig, AppResult};
use tafsir_retrieval::eval::{evaluate, load_ground_truth};

/// Score retrieval quality against a ground-truth file
#[derive(Args, Debug)]
pub struct EvalCommand {
    /// JSON file of `{query, relevant}` entries
    pub ground_truth: PathBuf,

    /// Cutoff rank for Precision@k (default: configured topK)
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl EvalCommand {
    /// Execute the eval command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Evaluating retrieval against {:?}", self.ground_truth);

        let retriever = super::build_retriever(config)?;
        let entries = load_ground_truth(&self.ground_truth)?;
        let k = self.k.unwrap_or(config.retrieval.top_k as usize);

        let report = evaluate(&retriever, &entries, k, config.retrieval.min_score).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("Queries evaluated: {}", report.queries);
            println!("Mean Precision@{}: {:.3}", k, report.mean_precision);
            println!("Mean Recall:      {:.3}", report.mean_recall);
            println!("Mean MRR:         {:.3}", report.mean_mrr);
        }

        Ok(())
    }
}
