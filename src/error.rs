use thiserror::Error;

/// Structured error context for configuration and response errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key or response path that caused the error (e.g., "api_endpoint", "data.messages[0].content")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the offending value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config_validator", "messari_client")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the copilot provider.
///
/// Only [`Error::Configuration`] ever reaches a host through
/// [`Provider::get`](crate::provider::Provider::get); every other variant is
/// logged and degraded to "no answer" at the layer that produced it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Remote error: HTTP {status} {status_text}: {body}")]
    Remote {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Response error: {message}{}", format_context(.context))]
    Response {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Host capability error: {0}")]
    Host(#[from] anyhow::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a configuration error without context
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a response error with structured context
    pub fn response_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Response {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Response { context, .. } => Some(context),
            _ => None,
        }
    }

    /// HTTP status of a failed upstream call, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display_includes_context() {
        let err = Error::configuration_with_context(
            "API_ENDPOINT must be a secure HTTPS URL",
            ErrorContext::new()
                .with_field_path("api_endpoint")
                .with_source("config_validator"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: API_ENDPOINT must be a secure HTTPS URL (field: api_endpoint, source: config_validator)"
        );
        assert!(err.is_configuration());
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("api_endpoint")
        );
    }

    #[test]
    fn test_remote_error_exposes_status() {
        let err = Error::Remote {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "rate limited".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(
            err.to_string(),
            "Remote error: HTTP 500 Internal Server Error: rate limited"
        );
        assert!(err.context().is_none());
    }
}
