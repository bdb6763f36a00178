//! Interactive question loop.

use crate::assistant::Assistant;
use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::error::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat loop.
///
/// Each line is one independent question; errors are reported and the loop
/// continues. `exit`/`quit` (case-insensitive) terminate.
pub async fn run_chat(settings: Settings) -> Result<()> {
    let api_key = match preflight::require_api_key() {
        Ok(key) => key,
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info("Run 'svar doctor' for detailed diagnostics.");
            return Err(e);
        }
    };

    let assistant = Assistant::new(&settings, &api_key);

    println!("\n{}", style("Svar").bold().cyan());
    println!(
        "{}\n",
        style("Ask me anything, or type 'exit' to quit.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style(">").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            // End of input stream.
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        let spinner = Output::spinner("Thinking...");
        let outcome = assistant.answer(input).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(answer) => Output::answer(&answer)?,
            Err(e) => Output::error(&format!("{}", e)),
        }

        println!();
    }

    Ok(())
}
