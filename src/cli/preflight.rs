//! Pre-flight checks before talking to remote providers.
//!
//! The completion credential is validated eagerly so a missing key fails
//! with a configuration error at startup instead of on the first request.

use crate::error::{Result, SvarError};

/// Environment variable holding the Groq API key.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

/// Read and validate the completion API credential.
pub fn require_api_key() -> Result<String> {
    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.is_empty() => Ok(key),
        Ok(_) => Err(SvarError::Config(format!(
            "{} is empty. Set it with: export {}='gsk_...'",
            API_KEY_VAR, API_KEY_VAR
        ))),
        Err(_) => Err(SvarError::Config(format!(
            "{} not set. Set it with: export {}='gsk_...'",
            API_KEY_VAR, API_KEY_VAR
        ))),
    }
}
