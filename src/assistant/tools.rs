//! Tool-call envelope parsing and dispatch.
//!
//! The routing model returns either free text or a JSON envelope naming a
//! tool. `classify` decides which, without ever failing: text that is not a
//! valid envelope is an answer in its own right. Decoding an envelope into a
//! typed [`ToolCall`] is where name and argument contracts are enforced.

use crate::error::{Result, SvarError};
use crate::search::{SearchTool, ToolResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Name of the one implemented tool.
pub const SEARCH_TOOL_NAME: &str = "search_tool";

/// The JSON envelope the routing model emits for tool calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallEnvelope {
    pub tool_call: ToolCallRequest,
}

/// The inner tool request: a name plus string-keyed arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: HashMap<String, String>,
}

/// How a model response should be handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Response was not valid JSON; show it verbatim.
    DirectOutput(String),
    /// Response was JSON but carried no tool call; show it verbatim.
    NoToolCall(String),
    /// Response named a tool.
    ToolCall(Box<ToolCallEnvelope>),
}

/// Classify a raw model response.
///
/// This never fails: a JSON parse error is the signal for a direct answer,
/// and JSON without a `tool_call` key is an answer the model chose to wrap
/// in an object.
pub fn classify(response: &str) -> Dispatch {
    // A bare JSON scalar ("42") is direct text for our purposes, same as
    // something that fails to parse at all.
    let value: serde_json::Value = match serde_json::from_str::<serde_json::Value>(response) {
        Ok(v) if v.is_object() => v,
        _ => return Dispatch::DirectOutput(response.to_string()),
    };

    if value.get("tool_call").is_none() {
        return Dispatch::NoToolCall(response.to_string());
    }

    match serde_json::from_value::<ToolCallEnvelope>(value) {
        Ok(envelope) => Dispatch::ToolCall(Box::new(envelope)),
        // A `tool_call` key with an unusable shape is still shown verbatim.
        Err(_) => Dispatch::NoToolCall(response.to_string()),
    }
}

/// A typed, validated tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    /// Contextual web search.
    Search { query: String },
}

impl ToolCall {
    /// Decode a request into a typed call, enforcing the tool's argument
    /// contract before anything is invoked.
    pub fn decode(request: &ToolCallRequest) -> Result<Self> {
        match request.name.as_str() {
            SEARCH_TOOL_NAME => {
                let query = request
                    .arguments
                    .get("query")
                    .filter(|q| !q.trim().is_empty())
                    .ok_or_else(|| SvarError::MissingArgument {
                        tool: SEARCH_TOOL_NAME.to_string(),
                        argument: "query".to_string(),
                    })?;
                Ok(ToolCall::Search {
                    query: query.clone(),
                })
            }
            other => Err(SvarError::UnknownTool(other.to_string())),
        }
    }
}

/// Tool execution context.
pub struct Toolbox {
    search: SearchTool,
}

impl Toolbox {
    /// Create a new toolbox.
    pub fn new(search: SearchTool) -> Self {
        Self { search }
    }

    /// Execute a validated tool call.
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        match call {
            ToolCall::Search { query } => {
                info!("Executing search_tool: {}", query);
                self.search.run(query).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_invalid_json_is_direct_output() {
        // Plain text passes through verbatim.
        assert_eq!(classify("42"), Dispatch::DirectOutput("42".to_string()));
        assert_eq!(
            classify("The capital of France is Paris."),
            Dispatch::DirectOutput("The capital of France is Paris.".to_string())
        );
    }

    #[test]
    fn test_classify_json_without_tool_call_key() {
        let response = r#"{"answer": "Paris"}"#;
        assert_eq!(
            classify(response),
            Dispatch::NoToolCall(response.to_string())
        );
    }

    #[test]
    fn test_classify_tool_call_envelope() {
        let response = r#"{"tool_call": {"name": "search_tool", "arguments": {"query": "current weather in Lahore, Pakistan today"}}}"#;

        match classify(response) {
            Dispatch::ToolCall(envelope) => {
                assert_eq!(envelope.tool_call.name, "search_tool");
                assert_eq!(
                    envelope.tool_call.arguments.get("query").unwrap(),
                    "current weather in Lahore, Pakistan today"
                );
            }
            other => panic!("Expected ToolCall, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_malformed_envelope_falls_back() {
        // `tool_call` present but not an object the envelope accepts.
        let response = r#"{"tool_call": "search please"}"#;
        assert_eq!(
            classify(response),
            Dispatch::NoToolCall(response.to_string())
        );
    }

    #[test]
    fn test_decode_search_call() {
        let request = ToolCallRequest {
            name: "search_tool".to_string(),
            arguments: HashMap::from([("query".to_string(), "pm of pakistan".to_string())]),
        };
        assert_eq!(
            ToolCall::decode(&request).unwrap(),
            ToolCall::Search {
                query: "pm of pakistan".to_string()
            }
        );
    }

    #[test]
    fn test_decode_missing_query_is_argument_error() {
        let request = ToolCallRequest {
            name: "search_tool".to_string(),
            arguments: HashMap::new(),
        };
        match ToolCall::decode(&request) {
            Err(SvarError::MissingArgument { tool, argument }) => {
                assert_eq!(tool, "search_tool");
                assert_eq!(argument, "query");
            }
            other => panic!("Expected MissingArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_blank_query_is_argument_error() {
        let request = ToolCallRequest {
            name: "search_tool".to_string(),
            arguments: HashMap::from([("query".to_string(), "   ".to_string())]),
        };
        assert!(matches!(
            ToolCall::decode(&request),
            Err(SvarError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_decode_unknown_tool() {
        let request = ToolCallRequest {
            name: "calculator".to_string(),
            arguments: HashMap::new(),
        };
        match ToolCall::decode(&request) {
            Err(SvarError::UnknownTool(name)) => assert_eq!(name, "calculator"),
            other => panic!("Expected UnknownTool, got {:?}", other),
        }
    }
}
