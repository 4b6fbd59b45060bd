//! Messari AI Toolkit client.
//!
//! The client performs one chat-completions call per question and never
//! surfaces an error past [`QuestionAnswerer::ask_question`]: every transport,
//! status or decoding failure is logged and becomes `None`.
//! Implementation details are split into submodules under `src/client/`.

mod builder;
mod core;
pub mod types;

pub use builder::MessariClientBuilder;
pub use self::core::{MessariClient, API_KEY_HEADER};
pub use types::{ChatMessage, ChatRequest, ChatResponse, ChatResponseData};

use async_trait::async_trait;

/// Answers a research question through an external API.
#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    /// Answer text, or `None` when no answer could be obtained.
    async fn ask_question(&self, endpoint: &str, api_key: &str, question: &str) -> Option<String>;
}
