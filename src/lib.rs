//! # messari-copilot
//!
//! Context provider for conversational agent runtimes that answers crypto
//! research questions through the Messari AI Toolkit.
//!
//! ## Overview
//!
//! For every incoming chat message the provider asks the host's language model
//! whether the message contains a research question (market data, rankings,
//! protocol metrics, ...). If it does, the canonical question is answered from
//! the host's semantic memory when a fresh, similar answer already exists, and
//! from the Messari API otherwise. New answers are written back to memory for
//! reuse.
//!
//! ## Core Philosophy
//!
//! - **Host-Injected**: generation, embedding and the memory store are traits the host implements
//! - **Degrade, Don't Fail**: every runtime failure becomes "no answer"; only misconfiguration is an error
//! - **Cache Before Network**: similar questions reuse answers while they are fresh
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use messari_copilot::{CopilotConfig, CopilotProvider, Provider};
//! use messari_copilot::host::AgentRuntime;
//! use messari_copilot::types::{Message, State};
//!
//! async fn context_for(
//!     runtime: &dyn AgentRuntime,
//!     message: &Message,
//!     state: &State,
//! ) -> messari_copilot::Result<Option<String>> {
//!     let provider = CopilotProvider::new(CopilotConfig::from_env())?;
//!     provider.get(runtime, message, Some(state)).await
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Tunables, defaults, validation, env / YAML overrides |
//! | [`host`] | Capability traits implemented by the host runtime |
//! | [`types`] | Messages, conversation state, cached answer records |
//! | [`template`] | Question-extraction prompt composition |
//! | [`client`] | Messari AI Toolkit HTTP client |
//! | [`cache`] | Semantic answer cache over the host memory store |
//! | [`provider`] | The extraction and answer pipeline |
//! | [`plugins`] | Plugin descriptor registered with the host |

pub mod cache;
pub mod client;
pub mod config;
pub mod host;
pub mod plugins;
pub mod provider;
pub mod template;
pub mod types;
pub mod utils;

pub use cache::MemoryCache;
pub use client::{MessariClient, QuestionAnswerer};
pub use config::CopilotConfig;
pub use plugins::{messari_plugin, Plugin};
pub use provider::{CopilotProvider, Provider};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
