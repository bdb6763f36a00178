//! Ask command implementation.

use crate::assistant::Assistant;
use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::error::{Result, SvarError};

/// Run a single question and exit.
pub async fn run_ask(question: &str, model: Option<String>, mut settings: Settings) -> Result<()> {
    if question.trim().is_empty() {
        Output::warning("Please enter a question.");
        return Err(SvarError::InvalidInput("Question is empty".to_string()));
    }

    let api_key = match preflight::require_api_key() {
        Ok(key) => key,
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info("Run 'svar doctor' for detailed diagnostics.");
            return Err(e);
        }
    };

    if let Some(model) = model {
        settings.completion.model = model;
    }

    let assistant = Assistant::new(&settings, &api_key);

    let spinner = Output::spinner("Thinking...");
    let outcome = assistant.answer(question).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(answer) => {
            Output::answer(&answer)?;
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            Err(e)
        }
    }
}
