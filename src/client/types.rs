//! Wire types of the chat-completions endpoint.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body: the question as the only user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn question(question: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(question)],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseData {
    pub messages: Vec<ChatMessage>,
}

/// Success body: `{ "data": { "messages": [ { "content", "role" }, ... ] } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub data: ChatResponseData,
}

impl ChatResponse {
    /// Content of the first returned message. Empty content counts as no answer.
    pub fn into_answer(self) -> Result<String> {
        let first = self.data.messages.into_iter().next().ok_or_else(|| {
            Error::response_with_context(
                "No messages in response",
                ErrorContext::new()
                    .with_field_path("data.messages")
                    .with_source("messari_client"),
            )
        })?;
        if first.content.trim().is_empty() {
            return Err(Error::response_with_context(
                "Empty answer in response",
                ErrorContext::new()
                    .with_field_path("data.messages[0].content")
                    .with_source("messari_client"),
            ));
        }
        Ok(first.content)
    }
}
