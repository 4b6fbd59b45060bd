//! MessariClient against a local mock HTTP server.

mod common;

use async_trait::async_trait;
use common::{init_tracing, message_in, FakeRuntime, API_KEY};
use messari_copilot::client::API_KEY_HEADER;
use messari_copilot::{CopilotConfig, CopilotProvider, Error, MessariClient, Provider, QuestionAnswerer};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

const PATH: &str = "/ai/v1/chat/completions";
const QUESTION: &str = "what are the top 10 L2s by fees";

fn success_body(answer: &str) -> String {
    json!({
        "data": {
            "messages": [
                { "role": "assistant", "content": answer }
            ]
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_successful_answer_is_returned() {
    init_tracing();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header(API_KEY_HEADER, API_KEY)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "messages": [ { "role": "user", "content": QUESTION } ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_body("Arbitrum, Base and Optimism lead L2 fees."))
        .expect(1)
        .create_async()
        .await;

    let client = MessariClient::new().unwrap();
    let endpoint = format!("{}{}", server.url(), PATH);
    let answer = client.ask_question(&endpoint, API_KEY, QUESTION).await;

    assert_eq!(
        answer.as_deref(),
        Some("Arbitrum, Base and Optimism lead L2 fees.")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_key_is_not_sent_in_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Missing)
        .match_header(API_KEY_HEADER, API_KEY)
        .with_status(200)
        .with_body(success_body("ok"))
        .create_async()
        .await;

    let client = MessariClient::new().unwrap();
    let endpoint = format!("{}{}", server.url(), PATH);
    assert!(client.ask_question(&endpoint, API_KEY, QUESTION).await.is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_captured_and_degrades_to_none() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(500)
        .with_body("rate limited")
        .expect(2)
        .create_async()
        .await;

    let client = MessariClient::new().unwrap();
    let endpoint = format!("{}{}", server.url(), PATH);

    match client.try_ask(&endpoint, API_KEY, QUESTION).await {
        Err(Error::Remote {
            status,
            status_text,
            body,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected remote error, got {:?}", other),
    }
    assert!(client.ask_question(&endpoint, API_KEY, QUESTION).await.is_none());
}

#[tokio::test]
async fn test_malformed_json_degrades_to_none() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("{ not json")
        .create_async()
        .await;

    let client = MessariClient::new().unwrap();
    let endpoint = format!("{}{}", server.url(), PATH);

    assert!(matches!(
        client.try_ask(&endpoint, API_KEY, QUESTION).await,
        Err(Error::Serialization(_))
    ));
    assert!(client.ask_question(&endpoint, API_KEY, QUESTION).await.is_none());
}

#[tokio::test]
async fn test_missing_fields_degrade_to_none() {
    let mut server = Server::new_async().await;
    let _wrong_shape = server
        .mock("POST", "/wrong-shape")
        .with_status(200)
        .with_body(json!({ "choices": [] }).to_string())
        .create_async()
        .await;
    let _no_messages = server
        .mock("POST", "/no-messages")
        .with_status(200)
        .with_body(json!({ "data": { "messages": [] } }).to_string())
        .create_async()
        .await;

    let client = MessariClient::new().unwrap();
    for path in ["/wrong-shape", "/no-messages"] {
        let endpoint = format!("{}{}", server.url(), path);
        assert!(
            client.ask_question(&endpoint, API_KEY, QUESTION).await.is_none(),
            "path {}",
            path
        );
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_degrades_to_none() {
    let client = MessariClient::new().unwrap();
    let result = client
        .try_ask("http://127.0.0.1:1/ai/v1/chat/completions", API_KEY, QUESTION)
        .await;
    assert!(matches!(result, Err(Error::Transport(_))));
    assert!(client
        .ask_question("http://127.0.0.1:1/ai/v1/chat/completions", API_KEY, QUESTION)
        .await
        .is_none());
}

#[tokio::test]
async fn test_custom_key_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-api-key", API_KEY)
        .with_status(200)
        .with_body(success_body("ok"))
        .create_async()
        .await;

    let client = MessariClient::builder()
        .api_key_header("x-api-key")
        .http_client(reqwest::Client::new())
        .build()
        .unwrap();
    let endpoint = format!("{}{}", server.url(), PATH);
    assert_eq!(
        client.ask_question(&endpoint, API_KEY, QUESTION).await.as_deref(),
        Some("ok")
    );
    mock.assert_async().await;
}

#[test]
fn test_invalid_key_header_is_configuration_error() {
    let err = MessariClient::builder()
        .api_key_header("not a header")
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
}

/// Sends every question to the mock server regardless of the configured endpoint.
struct MockEndpoint {
    client: MessariClient,
    url: String,
}

#[async_trait]
impl QuestionAnswerer for MockEndpoint {
    async fn ask_question(&self, _endpoint: &str, api_key: &str, question: &str) -> Option<String> {
        self.client.ask_question(&self.url, api_key, question).await
    }
}

#[tokio::test]
async fn test_rate_limited_upstream_returns_none_and_skips_cache_write() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(500)
        .with_body("rate limited")
        .expect(1)
        .create_async()
        .await;

    let answerer = Arc::new(MockEndpoint {
        client: MessariClient::new().unwrap(),
        url: format!("{}{}", server.url(), PATH),
    });
    let provider = CopilotProvider::with_answerer(CopilotConfig::default(), answerer).unwrap();
    let runtime = FakeRuntime::new().generating(QUESTION);

    let result = provider
        .get(&runtime, &message_in(Uuid::new_v4(), "top L2s by fees?"), None)
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(runtime.created_records().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_answer_from_upstream_is_cached() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(success_body("Base leads with $1.2M in daily fees."))
        .create_async()
        .await;

    let answerer = Arc::new(MockEndpoint {
        client: MessariClient::new().unwrap(),
        url: format!("{}{}", server.url(), PATH),
    });
    let provider = CopilotProvider::with_answerer(CopilotConfig::default(), answerer).unwrap();
    let runtime = FakeRuntime::new().generating(QUESTION);

    let result = provider
        .get(&runtime, &message_in(Uuid::new_v4(), "top L2s by fees?"), None)
        .await
        .unwrap();

    assert_eq!(result.as_deref(), Some("Base leads with $1.2M in daily fees."));
    let created = runtime.created_records();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].0.content.action, QUESTION);
}
