//! Groq client configuration with sensible defaults.
//!
//! Groq exposes an OpenAI-compatible API, so the client is an
//! [`async_openai::Client`] pointed at the Groq base URL.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default base URL for the Groq OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Create a Groq client with the configured credential and timeout.
///
/// The timeout comes from settings and prevents hung API calls.
pub fn create_client_with_timeout(
    api_key: &str,
    base_url: &str,
    timeout: Duration,
) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    let config = OpenAIConfig::new()
        .with_api_base(base_url)
        .with_api_key(api_key);

    Client::with_config(config).with_http_client(http_client)
}
