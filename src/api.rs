use crate::errors::{ChatError, ChatResult};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Endpoint used when the config file and environment provide none.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/chat";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Client for the reply backend: one JSON POST per user message.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `text` to the backend and returns the reply text.
    ///
    /// Status mapping:
    /// - 2xx with a parsable `bot_response` field: `Ok(reply)`
    /// - 2xx with an unparsable body or a missing field: `MalformedReply`
    /// - any other status: `Backend`, carrying the body's `bot_response`
    ///   when one is present
    /// - no response at all: `Connect`
    pub async fn request_reply(&self, text: &str) -> ChatResult<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ChatRequest { message: text })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let value: Value = serde_json::from_str(&body)
                .map_err(|e| ChatError::MalformedReply(e.to_string()))?;
            value["bot_response"]
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| {
                    ChatError::MalformedReply("response missing bot_response field".to_string())
                })
        } else {
            // Error bodies are expected to share the reply shape, but a
            // backend in trouble may send anything; parse leniently.
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["bot_response"].as_str().map(str::to_string));
            Err(ChatError::Backend {
                status: status.as_u16(),
                message,
            })
        }
    }
}
