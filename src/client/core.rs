use crate::client::builder::MessariClientBuilder;
use crate::client::types::{ChatRequest, ChatResponse};
use crate::client::QuestionAnswerer;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderName, CONTENT_TYPE};
use tracing::{debug, error};

/// Header the Messari API reads the key from.
pub const API_KEY_HEADER: &str = "x-messari-api-key";

/// HTTP client for the Messari AI Toolkit chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct MessariClient {
    http: reqwest::Client,
    api_key_header: HeaderName,
}

impl MessariClient {
    pub fn builder() -> MessariClientBuilder {
        MessariClientBuilder::new()
    }

    pub fn new() -> Result<Self> {
        MessariClientBuilder::new().build()
    }

    pub(crate) fn from_parts(http: reqwest::Client, api_key_header: HeaderName) -> Self {
        Self {
            http,
            api_key_header,
        }
    }

    /// Ask `question` and return the first answer, or the reason there is none.
    ///
    /// The key travels only in the API key header, never in the URL or body.
    pub async fn try_ask(&self, endpoint: &str, api_key: &str, question: &str) -> Result<String> {
        let response = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(self.api_key_header.clone(), api_key)
            .json(&ChatRequest::question(question))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        parsed.into_answer()
    }
}

#[async_trait]
impl QuestionAnswerer for MessariClient {
    async fn ask_question(&self, endpoint: &str, api_key: &str, question: &str) -> Option<String> {
        match self.try_ask(endpoint, api_key, question).await {
            Ok(answer) => {
                debug!(response = %answer, "Messari API response");
                Some(answer)
            }
            Err(Error::Remote {
                status,
                status_text,
                body,
            }) => {
                error!(
                    status,
                    status_text = %status_text,
                    response_text = %body,
                    "Error calling Messari API"
                );
                None
            }
            Err(e) => {
                error!(status = ?e.status(), message = %e, "Error calling Messari API");
                None
            }
        }
    }
}
