//! Chat-completion requests against the Groq API.
//!
//! One request per question: a fixed router system prompt plus the user's
//! question, constrained to JSON-object output so tool calls come back in a
//! parseable envelope. Malformed JSON is not validated here; the dispatcher
//! decides what the text means.

use crate::config::Settings;
use crate::error::{Result, SvarError};
use crate::groq::create_client_with_timeout;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
};
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for the routing/answering model.
pub struct CompletionClient {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    system_prompt: String,
}

impl CompletionClient {
    /// Create a new completion client from settings and the API credential.
    pub fn new(settings: &Settings, api_key: &str) -> Self {
        let client = create_client_with_timeout(
            api_key,
            &settings.completion.base_url,
            Duration::from_secs(settings.completion.timeout_seconds),
        );

        Self {
            client,
            model: settings.completion.model.clone(),
            temperature: settings.completion.temperature,
            system_prompt: crate::config::router_system_prompt(settings),
        }
    }

    /// Request a model response for a single question.
    ///
    /// Returns the trimmed message content. Provider failures map to
    /// [`SvarError::Completion`]; there is no retry.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn request(&self, question: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| SvarError::Completion(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(question)
                .build()
                .map_err(|e| SvarError::Completion(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .response_format(ResponseFormat::JsonObject)
            .messages(messages)
            .build()
            .map_err(|e| SvarError::Completion(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SvarError::Completion(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| SvarError::Completion("Empty response from model".to_string()))?;

        debug!("Model returned {} bytes", content.len());

        Ok(content.trim().to_string())
    }

    /// The model this client talks to.
    pub fn model(&self) -> &str {
        &self.model
    }
}
