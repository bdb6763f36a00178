//! Prompt templates for Svar.

/// System prompt for the routing model.
///
/// The model must either emit a `tool_call` JSON envelope for factual or
/// time-sensitive questions, or answer conceptual questions directly in text.
/// Queries are rewritten into self-contained form before they reach the
/// search provider.
pub const ROUTER_SYSTEM_PROMPT: &str = r#"You are a reasoning assistant with access to a web search tool.

If the user asks for factual, real-world, or up-to-date information, you MUST respond ONLY with a JSON object in this format:

{
  "tool_call": {
    "name": "search_tool",
    "arguments": {"query": "<rephrased, clear question>"}
  }
}

Always rewrite vague or short queries into complete, context-rich ones. Examples:
  - 'prime minister of Pakistan' → 'who is the incumbent prime minister of Pakistan as of today'
  - 'lahore weather' → 'current weather in Lahore, Pakistan today'
  - 'top wwe stars' → 'top 5 current WWE superstars in 2025'

If the question is purely conceptual or logical, respond directly in text instead of JSON."#;

/// Resolve the effective router system prompt from settings.
pub fn router_system_prompt(settings: &crate::config::Settings) -> String {
    settings
        .prompts
        .router_system
        .clone()
        .unwrap_or_else(|| ROUTER_SYSTEM_PROMPT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_default_prompt_mentions_tool() {
        assert!(ROUTER_SYSTEM_PROMPT.contains("search_tool"));
        assert!(ROUTER_SYSTEM_PROMPT.contains("tool_call"));
    }

    #[test]
    fn test_prompt_override() {
        let mut settings = Settings::default();
        assert_eq!(router_system_prompt(&settings), ROUTER_SYSTEM_PROMPT);

        settings.prompts.router_system = Some("custom".to_string());
        assert_eq!(router_system_prompt(&settings), "custom");
    }
}
