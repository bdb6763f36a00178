//! Assistant orchestration: tool-call dispatch over model responses.
//!
//! The routing model either answers a question directly or asks for the
//! web search tool through a JSON envelope. This module owns the envelope
//! parsing, the typed tool dispatch, and the shared `answer` sequence both
//! presenters consume.

mod runner;
mod tools;

pub use runner::{Answer, Assistant, ConversationTrace, TraceEntry, TraceToolResponse};
pub use tools::{
    classify, Dispatch, ToolCall, ToolCallEnvelope, ToolCallRequest, Toolbox, SEARCH_TOOL_NAME,
};
