//! Ask command handler.
//!
//! Answers one question and prints the result. Marker-prefixed failure
//! strings from the pipeline print like any other answer, so scripts
//! never have to handle a crash for a missing verse.

use clap::Args;
use std::path::PathBuf;
use tafsir_core::{config::AppConfig, is_marked_answer, AppError, AppResult};

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    /// Read the question from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the evidence chunks instead of generating an answer
    #[arg(long)]
    pub evidence_only: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let question = self
            .get_question()?
            .ok_or_else(|| AppError::Config("No question provided".to_string()))?;

        let pipeline = super::build_pipeline(config)?;

        if self.evidence_only {
            let evidence = pipeline.evidence(&question).await?;
            if self.json {
                println!("{}", serde_json::to_string_pretty(&evidence)?);
            } else if evidence.is_empty() {
                println!("No evidence found.");
            } else {
                for candidate in &evidence {
                    println!(
                        "[{:.3}] {} {}:{} ({})",
                        candidate.score,
                        candidate.surah_name,
                        candidate.surah_number,
                        candidate.ayat_number,
                        candidate.source_type
                    );
                }
            }
            return Ok(());
        }

        let answer = pipeline.answer(&question).await;

        if self.json {
            let output = serde_json::json!({
                "question": question,
                "answer": answer,
                "degraded": is_marked_answer(&answer),
                "model": config.generation.model,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }

    /// Get the question text from argument or file. A file that cannot
    /// be read is an error, not a missing question.
    fn get_question(&self) -> AppResult<Option<String>> {
        if let Some(question) = &self.question {
            return Ok(Some(question.clone()));
        }

        if let Some(path) = &self.file {
            let text = std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read question file {:?}: {}", path, e))
            })?;
            return Ok(Some(text));
        }

        Ok(None)
    }
}
