//! CLI output formatting utilities.

use crate::assistant::Answer;
use crate::error::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Render an answer with its structured sections.
    pub fn answer(answer: &Answer) -> Result<()> {
        match answer {
            Answer::ToolCall {
                tool_call,
                search_result,
                ..
            } => {
                println!("\n{}", style("Tool call detected:").bold());
                println!("{}", serde_json::to_string_pretty(tool_call)?);

                println!("\n{}", style("Search result:").bold());
                println!("{}", serde_json::to_string_pretty(search_result)?);

                if search_result.is_empty_sentinel() {
                    println!(
                        "\n{} {}",
                        style("Assistant:").cyan().bold(),
                        search_result.answers[0]
                    );
                } else {
                    println!(
                        "\n{} Here are the top results:",
                        style("Assistant:").cyan().bold()
                    );
                    for (i, ans) in search_result.answers.iter().enumerate() {
                        println!("{}. {}", i + 1, ans);
                    }
                }
            }
            Answer::NoToolCall { response } => {
                println!(
                    "\n{} {}",
                    style("Model output (no tool call):").bold(),
                    response
                );
            }
            Answer::DirectOutput { response } => {
                println!("\n{} {}", style("Model output:").bold(), response);
            }
        }
        Ok(())
    }
}
