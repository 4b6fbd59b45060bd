use crate::client::core::{MessariClient, API_KEY_HEADER};
use crate::{Error, ErrorContext, Result};

/// Builder for [`MessariClient`].
///
/// No timeout, proxy or retry policy is configured here; hosts that need one
/// pass a preconfigured `reqwest::Client`.
pub struct MessariClientBuilder {
    http_client: Option<reqwest::Client>,
    api_key_header: String,
}

impl MessariClientBuilder {
    pub fn new() -> Self {
        Self {
            http_client: None,
            api_key_header: API_KEY_HEADER.to_string(),
        }
    }

    /// Use an existing HTTP client (shared connection pool, proxy, TLS settings).
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Override the header carrying the API key.
    pub fn api_key_header(mut self, name: impl Into<String>) -> Self {
        self.api_key_header = name.into();
        self
    }

    pub fn build(self) -> Result<MessariClient> {
        let header = reqwest::header::HeaderName::from_bytes(self.api_key_header.as_bytes())
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid API key header name: {}", e),
                    ErrorContext::new()
                        .with_field_path("api_key_header")
                        .with_details(self.api_key_header.clone())
                        .with_source("messari_client_builder"),
                )
            })?;
        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().build().map_err(|e| {
                Error::configuration(format!("Failed to create HTTP client: {}", e))
            })?,
        };
        Ok(MessariClient::from_parts(http, header))
    }
}

impl Default for MessariClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
