//! Shared answer orchestration.
//!
//! One `Assistant` serves both presenters: the CLI loop and the web server
//! call [`Assistant::answer`] and only differ in how they render the
//! resulting [`Answer`].

use super::tools::{classify, Dispatch, ToolCall, ToolCallEnvelope, ToolCallRequest, Toolbox};
use crate::completion::CompletionClient;
use crate::config::Settings;
use crate::error::{Result, SvarError};
use crate::search::{DuckDuckGo, SearchTool, ToolResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Synthetic closing line appended to the conversation trace.
const CLOSING_ASSISTANT_LINE: &str = "Here are the top results I found from the web search.";

/// The assistant: completion routing plus tool execution.
pub struct Assistant {
    completion: CompletionClient,
    toolbox: Toolbox,
}

impl Assistant {
    /// Create an assistant from settings and the API credential.
    ///
    /// The search provider client is built once here and reused across
    /// questions.
    pub fn new(settings: &Settings, api_key: &str) -> Self {
        let provider = Arc::new(DuckDuckGo::new(Duration::from_secs(
            settings.search.timeout_seconds,
        )));
        let search = SearchTool::new(provider, settings.search.clone());

        Self {
            completion: CompletionClient::new(settings, api_key),
            toolbox: Toolbox::new(search),
        }
    }

    /// Answer a single question.
    ///
    /// Runs the full sequence: completion request, dispatch, optional tool
    /// invocation, trace assembly. Each question is an independent unit of
    /// failure; errors are returned, never retried.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SvarError::InvalidInput("Question is empty".to_string()));
        }

        let response = self.completion.request(question).await?;

        match classify(&response) {
            Dispatch::DirectOutput(text) => {
                debug!("Model answered directly (non-JSON)");
                Ok(Answer::DirectOutput { response: text })
            }
            Dispatch::NoToolCall(text) => {
                debug!("Model answered in JSON without a tool call");
                Ok(Answer::NoToolCall { response: text })
            }
            Dispatch::ToolCall(envelope) => {
                info!("Tool call detected: {}", envelope.tool_call.name);
                let call = ToolCall::decode(&envelope.tool_call)?;
                let result = self.toolbox.execute(&call).await?;
                let trace = ConversationTrace::for_search(question, &envelope.tool_call, &result);

                Ok(Answer::ToolCall {
                    tool_call: *envelope,
                    search_result: result,
                    conversation_log: trace,
                })
            }
        }
    }

    /// The model this assistant routes questions through.
    pub fn model(&self) -> &str {
        self.completion.model()
    }
}

/// The presentable outcome of one question.
///
/// The serialized form matches what the web UI consumes: a `type` tag plus
/// either a `response` string or the tool-call/search-result/trace triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Answer {
    /// The model invoked the search tool.
    ToolCall {
        tool_call: ToolCallEnvelope,
        search_result: ToolResult,
        conversation_log: ConversationTrace,
    },
    /// Valid JSON without a tool call; shown verbatim.
    NoToolCall { response: String },
    /// Free text; shown verbatim.
    DirectOutput { response: String },
}

/// Display-only log of the full interaction, assembled after the fact.
///
/// Fixed shape: user message, assistant tool-call, synthetic tool-response
/// message, synthetic closing assistant message. Never fed back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTrace {
    pub conversation: Vec<TraceEntry>,
}

/// One message in the conversation trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCallRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_response: Option<TraceToolResponse>,
}

/// The tool-response payload inside a trace entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceToolResponse {
    pub name: String,
    pub output: ToolResult,
}

impl ConversationTrace {
    /// Build the trace for a completed search invocation.
    pub fn for_search(question: &str, request: &ToolCallRequest, result: &ToolResult) -> Self {
        Self {
            conversation: vec![
                TraceEntry {
                    role: "user".to_string(),
                    content: Some(question.to_string()),
                    tool_call: None,
                    tool_response: None,
                },
                TraceEntry {
                    role: "assistant".to_string(),
                    content: None,
                    tool_call: Some(request.clone()),
                    tool_response: None,
                },
                TraceEntry {
                    role: "tool".to_string(),
                    content: None,
                    tool_call: None,
                    tool_response: Some(TraceToolResponse {
                        name: request.name.clone(),
                        output: result.clone(),
                    }),
                },
                TraceEntry {
                    role: "assistant".to_string(),
                    content: Some(CLOSING_ASSISTANT_LINE.to_string()),
                    tool_call: None,
                    tool_response: None,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample_request() -> ToolCallRequest {
        ToolCallRequest {
            name: "search_tool".to_string(),
            arguments: HashMap::from([(
                "query".to_string(),
                "current weather in Lahore, Pakistan today".to_string(),
            )]),
        }
    }

    fn sample_result() -> ToolResult {
        ToolResult {
            query: "current weather in Lahore, Pakistan today".to_string(),
            answers: vec!["Lahore Weather — Sunny (Source: https://example.com)".to_string()],
        }
    }

    #[test]
    fn test_trace_shape() {
        let trace = ConversationTrace::for_search("lahore weather", &sample_request(), &sample_result());

        let roles: Vec<&str> = trace.conversation.iter().map(|e| e.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant", "tool", "assistant"]);

        assert_eq!(trace.conversation[0].content.as_deref(), Some("lahore weather"));
        assert!(trace.conversation[1].tool_call.is_some());
        let tool_response = trace.conversation[2].tool_response.as_ref().unwrap();
        assert_eq!(tool_response.name, "search_tool");
        assert_eq!(tool_response.output, sample_result());
        assert_eq!(
            trace.conversation[3].content.as_deref(),
            Some(CLOSING_ASSISTANT_LINE)
        );
    }

    #[test]
    fn test_answer_serialization_tags() {
        let direct = Answer::DirectOutput {
            response: "42".to_string(),
        };
        let json = serde_json::to_value(&direct).unwrap();
        assert_eq!(json["type"], "direct_output");
        assert_eq!(json["response"], "42");

        let no_tool = Answer::NoToolCall {
            response: r#"{"answer": "Paris"}"#.to_string(),
        };
        let json = serde_json::to_value(&no_tool).unwrap();
        assert_eq!(json["type"], "no_tool_call");
    }

    #[test]
    fn test_tool_call_answer_serialization_fields() {
        let request = sample_request();
        let result = sample_result();
        let answer = Answer::ToolCall {
            tool_call: ToolCallEnvelope {
                tool_call: request.clone(),
            },
            search_result: result.clone(),
            conversation_log: ConversationTrace::for_search("lahore weather", &request, &result),
        };

        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["type"], "tool_call");
        assert_eq!(json["tool_call"]["tool_call"]["name"], "search_tool");
        assert_eq!(json["search_result"]["answers"].as_array().unwrap().len(), 1);
        assert_eq!(
            json["conversation_log"]["conversation"]
                .as_array()
                .unwrap()
                .len(),
            4
        );
        // Optional trace fields are omitted, not null.
        assert!(json["conversation_log"]["conversation"][0]
            .get("tool_call")
            .is_none());
    }
}
