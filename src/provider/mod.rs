//! Question extraction and answer pipeline.
//!
//! [`CopilotProvider`] is the context provider a host calls while composing
//! a reply. Per invocation it runs, in order:
//!
//! 1. configuration validation
//! 2. API key lookup through host settings
//! 3. prompt composition from the current message and the recent-message window
//! 4. question extraction through the host text generator
//! 5. `"NONE"` short-circuit
//! 6. answer cache lookup
//! 7. Messari API call on a miss
//! 8. cache write of a new answer
//!
//! Every stage after validation degrades to `Ok(None)` on failure. No stage
//! retries, and no state is kept between invocations apart from what the host
//! knowledge store holds.

use crate::cache::MemoryCache;
use crate::client::{MessariClient, QuestionAnswerer};
use crate::config::CopilotConfig;
use crate::host::{AgentRuntime, ModelClass};
use crate::template::{build_question_context, recent_messages, NO_QUESTION_SENTINEL};
use crate::types::{ConversationScope, Message, State};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const COPILOT_PROVIDER_NAME: &str = "messariCopilot";

/// A source of extra context for the host's reply composition.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// Context text for `message`, or `None` when there is nothing to add.
    async fn get(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Message,
        state: Option<&State>,
    ) -> Result<Option<String>>;
}

/// Answers research questions found in chat messages with the Messari AI Toolkit.
pub struct CopilotProvider {
    config: CopilotConfig,
    answerer: Arc<dyn QuestionAnswerer>,
    cache: MemoryCache,
    model_class: ModelClass,
}

impl CopilotProvider {
    /// Provider using the default HTTP client. Fails fast on invalid configuration.
    pub fn new(config: CopilotConfig) -> Result<Self> {
        let client = MessariClient::new()?;
        Self::with_answerer(config, Arc::new(client))
    }

    /// Provider with a caller-supplied answer source.
    pub fn with_answerer(config: CopilotConfig, answerer: Arc<dyn QuestionAnswerer>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            answerer,
            cache: MemoryCache::new(),
            model_class: ModelClass::Medium,
        })
    }

    pub fn with_cache(mut self, cache: MemoryCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_model_class(mut self, model_class: ModelClass) -> Self {
        self.model_class = model_class;
        self
    }

    pub fn config(&self) -> &CopilotConfig {
        &self.config
    }

    pub fn cache(&self) -> &MemoryCache {
        &self.cache
    }

    /// Extraction prompt for `message` given the conversation `state`.
    pub fn question_context(&self, message: &Message, state: Option<&State>) -> String {
        let recent = state
            .map(|s| {
                let texts: Vec<&str> = s.recent_messages.iter().map(Message::text).collect();
                recent_messages(&texts, self.config.recent_messages_count)
            })
            .unwrap_or_default();
        build_question_context(message.text(), &recent, &self.config)
    }

    async fn extract_question(&self, runtime: &dyn AgentRuntime, context: &str) -> Option<String> {
        match runtime.generate_text(context, self.model_class).await {
            Ok(question) => Some(question),
            Err(e) => {
                error!(error = %e, "Error generating research question");
                None
            }
        }
    }
}

#[async_trait]
impl Provider for CopilotProvider {
    fn name(&self) -> &str {
        COPILOT_PROVIDER_NAME
    }

    async fn get(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Message,
        state: Option<&State>,
    ) -> Result<Option<String>> {
        self.config.validate()?;

        let Some(api_key) = runtime.get_setting(&self.config.api_key_setting) else {
            error!(
                setting = %self.config.api_key_setting,
                "Messari API key not found in runtime settings"
            );
            return Ok(None);
        };

        let context = self.question_context(message, state);
        debug!(context = %context, "Generated question context");

        let Some(generated) = self.extract_question(runtime, &context).await else {
            return Ok(None);
        };
        let question = generated.trim();
        if question == NO_QUESTION_SENTINEL || question.is_empty() {
            info!("No research questions identified in the message");
            return Ok(None);
        }
        info!(question = %question, "Processing research question");

        let scope = ConversationScope::for_message(message, runtime.agent_id());
        if let Some(cached) = self
            .cache
            .find_relevant(runtime, &scope, question, self.config.memory_ttl())
            .await
        {
            info!("Using cached response from memory");
            return Ok(Some(cached));
        }

        let Some(answer) = self
            .answerer
            .ask_question(&self.config.api_endpoint, &api_key, question)
            .await
        else {
            return Ok(None);
        };

        self.cache.store(runtime, &scope, question, &answer).await;
        Ok(Some(answer))
    }
}
