//! Mock Gemini server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;

use prompt_improver::{GenerationClientBuilder, Relay};

pub const MODEL: &str = "gemini-1.5-flash-latest";
pub const API_KEY: &str = "test-key";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    pub fn path() -> String {
        format!("/v1beta/models/{}:generateContent", MODEL)
    }

    /// Relay whose client points at the mock server.
    pub fn relay(&self) -> Relay {
        let client = GenerationClientBuilder::new()
            .model(MODEL)
            .base_url_override(&self.base_url)
            .build()
            .expect("client should build");
        Relay::new(Arc::new(client))
    }

    /// Successful generateContent reply carrying `text`.
    pub async fn mock_text(&mut self, text: &str) -> Mock {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 10,
                "candidatesTokenCount": 20,
                "totalTokenCount": 30
            }
        });
        self.mock_json(200, &body.to_string()).await
    }

    pub async fn mock_json(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", Self::path().as_str())
            .match_query(Matcher::UrlEncoded("key".into(), API_KEY.into()))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(1)
            .create_async()
            .await
    }

    /// A mock that must never be hit.
    pub async fn mock_unreachable(&mut self) -> Mock {
        self.server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await
    }
}
