//! Host runtime capabilities.
//!
//! The copilot pipeline never talks to a language model, an embedding model or
//! a vector store directly. The host agent runtime injects those capabilities
//! through the traits in this module, which keeps the pipeline testable with
//! plain fakes.
//!
//! | Trait | Capability |
//! |-------|------------|
//! | [`Settings`] | Secret / setting lookup by name |
//! | [`TextGenerator`] | Prompt in, generated text out |
//! | [`Embedder`] | Text to embedding vector |
//! | [`KnowledgeStore`] | Similarity search and record creation |
//! | [`AgentRuntime`] | All of the above plus the agent's identity |
//!
//! Host failures are opaque to this crate and travel as [`anyhow::Error`].

use crate::types::{MemoryRecord, SearchOptions};
use async_trait::async_trait;
use std::env;
use uuid::Uuid;

/// Capability tier requested from the host text generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelClass {
    Small,
    #[default]
    Medium,
    Large,
}

impl ModelClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelClass::Small => "small",
            ModelClass::Medium => "medium",
            ModelClass::Large => "large",
        }
    }
}

/// Named runtime settings.
pub trait Settings: Send + Sync {
    fn get_setting(&self, key: &str) -> Option<String>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a fully composed prompt. May suspend for the duration of the model call.
    async fn generate_text(&self, context: &str, model_class: ModelClass) -> anyhow::Result<String>;
}

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

/// The host's semantic memory store.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Records whose similarity to `embedding` is at or above `options.match_threshold`,
    /// most similar first.
    async fn search_memories_by_embedding(
        &self,
        embedding: &[f32],
        options: SearchOptions,
    ) -> anyhow::Result<Vec<MemoryRecord>>;

    async fn create_memory(&self, record: MemoryRecord, unique: bool) -> anyhow::Result<()>;
}

/// Handle to the host agent runtime.
pub trait AgentRuntime: Settings + TextGenerator + Embedder + KnowledgeStore {
    fn agent_id(&self) -> Uuid;
}

/// [`Settings`] backed by process environment variables.
///
/// For hosts that keep secrets in the environment rather than a settings store.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    prefix: Option<String>,
}

impl EnvSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `{prefix}{key}` instead of `key`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

impl Settings for EnvSettings {
    fn get_setting(&self, key: &str) -> Option<String> {
        let name = match &self.prefix {
            Some(p) => format!("{}{}", p, key),
            None => key.to_string(),
        };
        env::var(name).ok().filter(|v| !v.is_empty())
    }
}
