use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::compliance::{build_prompt, Regulation};
use crate::config::ComplianceSettings;
use crate::error::{DocError, Result};

/// Produces a compliance report for one regulation.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, contract_text: &str, regulation: &Regulation) -> Result<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat-completion client for compliance analysis.
#[derive(Debug, Clone)]
pub struct ComplianceClient {
    http: Client,
    endpoint: String,
    model: String,
    temperature: f64,
    max_chars: usize,
    api_key: String,
}

impl ComplianceClient {
    pub fn new(settings: &ComplianceSettings, api_key: impl Into<String>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("doccheck/", env!("CARGO_PKG_VERSION")));
        if settings.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        }
        let http = builder.build()?;
        Ok(Self::with_http(settings, api_key, http))
    }

    /// Build on an existing HTTP client.
    #[must_use]
    pub fn with_http(settings: &ComplianceSettings, api_key: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_chars: settings.max_chars,
            api_key: api_key.into(),
        }
    }

    /// Send one user message and return the assistant's reply.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DocError::Api(format!("request to {} failed: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DocError::Api(format!("endpoint returned {status}: {}", detail.trim())));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| DocError::Api(format!("invalid JSON response: {e}")))?;
        extract_content(&payload)
    }
}

#[async_trait]
impl Analyzer for ComplianceClient {
    async fn analyze(&self, contract_text: &str, regulation: &Regulation) -> Result<String> {
        let prompt = build_prompt(contract_text, regulation, self.max_chars);
        tracing::debug!(
            regulation = %regulation.filename,
            prompt_chars = prompt.chars().count(),
            model = %self.model,
            "sending compliance request"
        );
        self.complete(&prompt).await
    }
}

/// `choices[0].message.content` of a chat-completion response.
fn extract_content(payload: &Value) -> Result<String> {
    payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| DocError::Api("unexpected response shape: missing choices[0].message.content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::test_support::{chat_reply, StubServer};
    use serde_json::json;

    fn settings(endpoint: &str) -> ComplianceSettings {
        ComplianceSettings {
            endpoint: endpoint.into(),
            ..ComplianceSettings::default()
        }
    }

    fn client(endpoint: &str) -> ComplianceClient {
        let http = Client::builder().no_proxy().build().unwrap();
        ComplianceClient::with_http(&settings(endpoint), "sk-test", http)
    }

    fn regulation() -> Regulation {
        Regulation {
            filename: "rules.docx".into(),
            content: "Art. 1".into(),
        }
    }

    #[test]
    fn extract_content_reads_first_choice() {
        let payload = json!({"choices": [{"message": {"role": "assistant", "content": "ok"}}]});
        assert_eq!(extract_content(&payload).unwrap(), "ok");
    }

    #[test]
    fn extract_content_rejects_other_shapes() {
        for payload in [
            json!({}),
            json!({"choices": []}),
            json!({"choices": [{"message": {}}]}),
            json!({"choices": [{"message": {"content": 42}}]}),
        ] {
            let err = extract_content(&payload).unwrap_err();
            assert!(matches!(err, DocError::Api(_)), "{payload}");
        }
    }

    #[test]
    fn request_body_shape() {
        let body = ChatRequest {
            model: "deepseek-reasoner",
            messages: [ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.2,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "deepseek-reasoner",
                "messages": [{"role": "user", "content": "hi"}],
                "temperature": 0.2
            })
        );
    }

    #[tokio::test]
    async fn analyze_posts_prompt_with_bearer_key() {
        let server = StubServer::start(vec![(200, chat_reply("Status: compliant"))]);
        let report = client(&server.url()).analyze("Clause 1", &regulation()).await.unwrap();
        assert_eq!(report, "Status: compliant");

        let requests = server.finish();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(request.head.starts_with("POST /v1/chat/completions "), "{}", request.head);
        assert!(
            request.head.to_ascii_lowercase().contains("authorization: bearer sk-test"),
            "{}",
            request.head
        );
        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["model"], "deepseek-reasoner");
        assert_eq!(body["temperature"], 0.2);
        assert_eq!(body["messages"][0]["role"], "user");
        let content = body["messages"][0]["content"].as_str().unwrap();
        assert!(content.contains("Clause 1"));
        assert!(content.contains("rules.docx"));
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let server = StubServer::start(vec![(401, r#"{"error":"bad key"}"#.to_string())]);
        let err = client(&server.url()).complete("hi").await.unwrap_err();
        server.finish();
        match err {
            DocError::Api(msg) => assert!(msg.contains("401"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_api_error() {
        let server = StubServer::start(vec![(200, "not json".to_string())]);
        let err = client(&server.url()).complete("hi").await.unwrap_err();
        server.finish();
        assert!(matches!(err, DocError::Api(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_api_error() {
        // Bind then drop to get a port nobody listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = client(&format!("http://127.0.0.1:{port}/v1/chat/completions"))
            .complete("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, DocError::Api(_)));
    }
}
