//! Provider configuration.
//!
//! [`CopilotConfig`] carries the four tunables of the copilot pipeline. All of
//! them have compiled-in defaults and can be overridden one by one, either
//! through the `with_*` setters, environment variables ([`CopilotConfig::from_env`])
//! or a YAML file ([`CopilotConfig::load_from_file`]).
//!
//! Loading never validates. [`CopilotConfig::validate`] is the single gate and
//! is run by the provider before any network or cache activity.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_RECENT_MESSAGES_COUNT: usize = 5;
pub const DEFAULT_API_ENDPOINT: &str = "https://api.messari.io/ai/v1/chat/completions";
pub const DEFAULT_API_KEY_SETTING: &str = "MESSARI_API_KEY";
pub const DEFAULT_MEMORY_TTL_HOURS: u64 = 24;

const SECURE_SCHEME_PREFIX: &str = "https://";
const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Tunables for the copilot provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopilotConfig {
    /// Number of prior messages included as supporting context.
    pub recent_messages_count: usize,
    /// Messari AI Toolkit chat completions endpoint. Must be HTTPS.
    pub api_endpoint: String,
    /// Name of the host setting that holds the API key.
    pub api_key_setting: String,
    /// How long a cached answer stays reusable, in hours.
    pub memory_ttl_hours: u64,
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            recent_messages_count: DEFAULT_RECENT_MESSAGES_COUNT,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            api_key_setting: DEFAULT_API_KEY_SETTING.to_string(),
            memory_ttl_hours: DEFAULT_MEMORY_TTL_HOURS,
        }
    }
}

impl CopilotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recent_messages_count(mut self, count: usize) -> Self {
        self.recent_messages_count = count;
        self
    }

    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    pub fn with_api_key_setting(mut self, name: impl Into<String>) -> Self {
        self.api_key_setting = name.into();
        self
    }

    pub fn with_memory_ttl_hours(mut self, hours: u64) -> Self {
        self.memory_ttl_hours = hours;
        self
    }

    /// The cache freshness window as a [`Duration`].
    pub fn memory_ttl(&self) -> Duration {
        Duration::from_secs(self.memory_ttl_hours.saturating_mul(SECONDS_PER_HOUR))
    }

    /// Defaults overridden by `MESSARI_*` environment variables.
    ///
    /// Values that are missing or fail to parse keep their default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            recent_messages_count: env_override(
                "MESSARI_RECENT_MESSAGES_COUNT",
                defaults.recent_messages_count,
            ),
            api_endpoint: env_override("MESSARI_API_ENDPOINT", defaults.api_endpoint),
            api_key_setting: env_override("MESSARI_API_KEY_SETTING", defaults.api_key_setting),
            memory_ttl_hours: env_override("MESSARI_MEMORY_TTL_HOURS", defaults.memory_ttl_hours),
        }
    }

    /// Parse a YAML document. Keys that are absent take their default.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str::<Self>(content).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid configuration document: {}", e),
                ErrorContext::new().with_source("config_loader"),
            )
        })
    }

    /// Load configuration from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config_loader"),
            )
        })?;
        Self::from_yaml_str(&content)
    }

    /// Reject configurations the pipeline cannot run with.
    ///
    /// Pure check, no side effects.
    pub fn validate(&self) -> Result<()> {
        if self.recent_messages_count < 1 {
            return Err(invalid(
                "RECENT_MESSAGES_COUNT must be greater than 0",
                "recent_messages_count",
                self.recent_messages_count.to_string(),
            ));
        }
        if self.memory_ttl_hours < 1 {
            return Err(invalid(
                "MEMORY_TTL_HOURS must be greater than 0",
                "memory_ttl_hours",
                self.memory_ttl_hours.to_string(),
            ));
        }
        if !self.api_endpoint.starts_with(SECURE_SCHEME_PREFIX) {
            return Err(invalid(
                "API_ENDPOINT must be a secure HTTPS URL",
                "api_endpoint",
                self.api_endpoint.clone(),
            ));
        }
        if self.api_key_setting.is_empty() {
            return Err(invalid(
                "ENV_API_KEY must be specified",
                "api_key_setting",
                String::new(),
            ));
        }
        Ok(())
    }
}

fn env_override<T: FromStr>(name: &str, default: T) -> T {
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => {
            debug!(var = name, "Applied configuration override from environment");
            value
        }
        Err(_) => {
            debug!(var = name, value = %raw, "Ignoring unparsable configuration override");
            default
        }
    }
}

fn invalid(message: &str, field: &str, value: String) -> Error {
    let mut context = ErrorContext::new()
        .with_field_path(field)
        .with_source("config_validator");
    if !value.is_empty() {
        context = context.with_details(format!("got {:?}", value));
    }
    Error::configuration_with_context(message, context)
}
