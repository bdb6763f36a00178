//! Configuration module for Svar.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{router_system_prompt, ROUTER_SYSTEM_PROMPT};
pub use settings::{
    CompletionSettings, GeneralSettings, PromptSettings, SafeSearch, SearchSettings,
    ServerSettings, Settings,
};
