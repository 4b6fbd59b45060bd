//! Fake host runtime and answer source shared by the integration tests.
#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use messari_copilot::host::{
    AgentRuntime, Embedder, KnowledgeStore, ModelClass, Settings, TextGenerator,
};
use messari_copilot::types::{MemoryRecord, Message, SearchOptions};
use messari_copilot::QuestionAnswerer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

pub const API_KEY: &str = "test-messari-key";
pub const HOUR_MS: i64 = 60 * 60 * 1000;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Host runtime whose every capability is scripted and counted.
pub struct FakeRuntime {
    pub agent_id: Uuid,
    pub settings: HashMap<String, String>,
    pub generated: Result<String, String>,
    pub embedding: Result<Vec<f32>, String>,
    pub search_results: Result<Vec<MemoryRecord>, String>,
    pub create_fails: bool,

    pub generate_calls: AtomicUsize,
    pub embed_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub prompts: Mutex<Vec<(String, ModelClass)>>,
    pub searches: Mutex<Vec<SearchOptions>>,
    pub created: Mutex<Vec<(MemoryRecord, bool)>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        let mut settings = HashMap::new();
        settings.insert("MESSARI_API_KEY".to_string(), API_KEY.to_string());
        Self {
            agent_id: Uuid::new_v4(),
            settings,
            generated: Ok("NONE".to_string()),
            embedding: Ok(vec![0.1, 0.2, 0.3]),
            search_results: Ok(Vec::new()),
            create_fails: false,
            generate_calls: AtomicUsize::new(0),
            embed_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            searches: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn generating(mut self, question: &str) -> Self {
        self.generated = Ok(question.to_string());
        self
    }

    pub fn failing_generation(mut self) -> Self {
        self.generated = Err("model unavailable".to_string());
        self
    }

    pub fn without_api_key(mut self) -> Self {
        self.settings.clear();
        self
    }

    pub fn with_cached(mut self, record: MemoryRecord) -> Self {
        self.search_results = Ok(vec![record]);
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.search_results = Err("vector index offline".to_string());
        self
    }

    pub fn failing_embedding(mut self) -> Self {
        self.embedding = Err("embedding model offline".to_string());
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.create_fails = true;
        self
    }

    pub fn generate_count(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn embed_count(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    pub fn created_records(&self) -> Vec<(MemoryRecord, bool)> {
        self.created.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().map(|(p, _)| p.clone())
    }
}

impl Settings for FakeRuntime {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.settings.get(key).cloned()
    }
}

#[async_trait]
impl TextGenerator for FakeRuntime {
    async fn generate_text(&self, context: &str, model_class: ModelClass) -> anyhow::Result<String> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((context.to_string(), model_class));
        self.generated.clone().map_err(|e| anyhow!(e))
    }
}

#[async_trait]
impl Embedder for FakeRuntime {
    async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        self.embedding.clone().map_err(|e| anyhow!(e))
    }
}

#[async_trait]
impl KnowledgeStore for FakeRuntime {
    async fn search_memories_by_embedding(
        &self,
        _embedding: &[f32],
        options: SearchOptions,
    ) -> anyhow::Result<Vec<MemoryRecord>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.searches.lock().unwrap().push(options);
        self.search_results.clone().map_err(|e| anyhow!(e))
    }

    async fn create_memory(&self, record: MemoryRecord, unique: bool) -> anyhow::Result<()> {
        if self.create_fails {
            return Err(anyhow!("knowledge store is read-only"));
        }
        self.created.lock().unwrap().push((record, unique));
        Ok(())
    }
}

impl AgentRuntime for FakeRuntime {
    fn agent_id(&self) -> Uuid {
        self.agent_id
    }
}

/// Answer source returning a fixed answer and recording every call.
pub struct FakeAnswerer {
    pub answer: Option<String>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeAnswerer {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionAnswerer for FakeAnswerer {
    async fn ask_question(&self, endpoint: &str, api_key: &str, question: &str) -> Option<String> {
        self.calls.lock().unwrap().push((
            endpoint.to_string(),
            api_key.to_string(),
            question.to_string(),
        ));
        self.answer.clone()
    }
}

pub fn message_in(room_id: Uuid, text: &str) -> Message {
    Message::new(Uuid::new_v4(), Uuid::new_v4(), room_id, text)
}
