//! Svar - LLM-routed web search assistant
//!
//! A small assistant that forwards questions to a Groq-hosted chat model,
//! lets the model decide whether a question needs a live web search, and
//! renders the combined result through a CLI loop or a single-page web UI.
//!
//! The name "Svar" comes from the Norwegian/Scandinavian word for "answer."
//!
//! # Overview
//!
//! Svar allows you to:
//! - Ask factual or time-sensitive questions and get web-backed answers
//! - Ask conceptual questions and get direct model answers
//! - Chat interactively from the terminal
//! - Serve the same assistant as a single-page web app
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt management
//! - `completion` - Chat-completion requests against the Groq API
//! - `assistant` - Tool-call dispatch and the shared answer orchestration
//! - `search` - Web search tool with relevance filtering
//! - `cli` - Command-line interface and the web server
//!
//! # Example
//!
//! ```rust,no_run
//! use svar::assistant::Assistant;
//! use svar::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let api_key = std::env::var("GROQ_API_KEY")?;
//!     let assistant = Assistant::new(&settings, &api_key);
//!
//!     let answer = assistant.answer("current weather in Lahore").await?;
//!     println!("{}", serde_json::to_string_pretty(&answer)?);
//!
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod groq;
pub mod search;

pub use error::{Result, SvarError};
