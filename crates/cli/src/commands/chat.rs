//! Chat command handler.
//!
//! Interactive stdin loop: one question per line, one answer per turn.
//! "exit" or "keluar" ends the session, as does end of input.

use clap::Args;
use std::io::{BufRead, Write};
use tafsir_core::{config::AppConfig, AppResult};

/// Interactive question loop
#[derive(Args, Debug)]
pub struct ChatCommand {}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Starting interactive session");

        let pipeline = super::build_pipeline(config)?;

        println!("Tafsir Assistant. Type 'exit' or 'keluar' to quit.");

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        loop {
            print!("> ");
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if matches!(question.to_lowercase().as_str(), "exit" | "keluar") {
                break;
            }

            let answer = pipeline.answer(question).await;
            println!("{}\n", answer);
        }

        println!("Goodbye.");
        Ok(())
    }
}
