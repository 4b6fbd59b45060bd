//! Base plugin types.

use crate::config::CopilotConfig;
use crate::provider::{CopilotProvider, Provider};
use crate::Result;
use std::sync::Arc;

pub const PLUGIN_NAME: &str = "messariAiToolkit";
pub const PLUGIN_DESCRIPTION: &str = "Messari AI Toolkit";

/// What a host registers: a named bundle of context providers.
#[derive(Clone)]
pub struct Plugin {
    pub name: String,
    pub description: String,
    pub providers: Vec<Arc<dyn Provider>>,
}

impl Plugin {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            providers: Vec::new(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn provider(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.iter().find(|p| p.name() == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("description", &self.description)
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name().to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The Messari plugin with default configuration.
pub fn messari_plugin() -> Result<Plugin> {
    messari_plugin_with_config(CopilotConfig::default())
}

pub fn messari_plugin_with_config(config: CopilotConfig) -> Result<Plugin> {
    let provider = CopilotProvider::new(config)?;
    Ok(Plugin::new(PLUGIN_NAME, PLUGIN_DESCRIPTION).with_provider(Arc::new(provider)))
}
