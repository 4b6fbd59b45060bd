//! Cached answer records and knowledge-store search parameters.

use super::message::Message;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiers a cached answer is tagged with. Lookups are scoped by `room_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationScope {
    pub user_id: Uuid,
    pub agent_id: Uuid,
    pub room_id: Uuid,
}

impl ConversationScope {
    pub fn new(user_id: Uuid, agent_id: Uuid, room_id: Uuid) -> Self {
        Self {
            user_id,
            agent_id,
            room_id,
        }
    }

    /// Scope of a triggering message, answered by `agent_id`.
    pub fn for_message(message: &Message, agent_id: Uuid) -> Self {
        Self::new(message.user_id, agent_id, message.room_id)
    }
}

/// Content of a cached answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryContent {
    /// The answer text.
    pub text: String,
    /// Origin tag of the pipeline that produced the record.
    pub source: String,
    /// The question the answer was obtained for.
    pub action: String,
}

/// A record in the host knowledge store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub agent_id: Uuid,
    pub room_id: Uuid,
    pub content: MemoryContent,
    /// Unix milliseconds. `None` means unknown age.
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Similarity to the search query, when returned from a search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

impl MemoryRecord {
    pub fn new(scope: ConversationScope, content: MemoryContent, created_at: i64) -> Self {
        Self {
            id: None,
            user_id: scope.user_id,
            agent_id: scope.agent_id,
            room_id: scope.room_id,
            content,
            created_at: Some(created_at),
            similarity: None,
        }
    }

    pub fn scope(&self) -> ConversationScope {
        ConversationScope::new(self.user_id, self.agent_id, self.room_id)
    }
}

/// Parameters for `KnowledgeStore::search_memories_by_embedding`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Minimum normalized similarity (0.0–1.0).
    pub match_threshold: f32,
    /// Maximum number of records to return.
    pub count: usize,
    /// Conversation the search is restricted to.
    pub room_id: Uuid,
    /// Only return distinct records.
    pub unique: bool,
}
