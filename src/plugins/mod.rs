//! Plugin descriptor handed to the host runtime.

mod base;

pub use base::{messari_plugin, messari_plugin_with_config, Plugin, PLUGIN_DESCRIPTION, PLUGIN_NAME};
