//! Incoming message and conversation state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message content. Only `text` is consumed by the copilot pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
            action: None,
        }
    }
}

/// A chat message as handed over by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub agent_id: Uuid,
    pub room_id: Uuid,
    pub content: Content,
    /// Unix milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Message {
    pub fn new(user_id: Uuid, agent_id: Uuid, room_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id,
            agent_id,
            room_id,
            content: Content::text(text),
            created_at: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_created_at(mut self, millis: i64) -> Self {
        self.created_at = Some(millis);
        self
    }

    pub fn text(&self) -> &str {
        &self.content.text
    }
}

/// Conversation state composed by the host for the current turn.
///
/// `recent_messages` is ordered oldest to newest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(default, rename = "recentMessagesData")]
    pub recent_messages: Vec<Message>,
}

impl State {
    pub fn new(recent_messages: Vec<Message>) -> Self {
        Self { recent_messages }
    }
}
