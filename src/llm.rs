use crate::error::LlmError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One chat-completion call. The model is chosen by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Ask the service for `{"type": "json_object"}` output.
    pub json_object: bool,
}

/// Anything that can answer a chat-completion request with the assistant's text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// OpenAI-compatible chat completions client.
///
/// Holds a single `reqwest::Client`, so connections are pooled across calls.
#[derive(Debug, Clone)]
pub struct LlmClient {
    api_key: String,
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            http: reqwest::Client::new(),
        }
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });
        if request.json_object {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }
        body
    }

    async fn call_llm(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("Calling {} with model {}", url, self.model);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: serde_json::Value = response.json().await?;

        if let Some(error) = response_json.get("error") {
            let message = error["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(LlmError::Api(message));
        }

        let choice = response_json["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| LlmError::UnexpectedResponse("No choices in LLM response".to_string()))?;

        if choice["finish_reason"].as_str() == Some("content_filter") {
            return Err(LlmError::ContentFiltered);
        }

        let content = choice["message"]["content"]
            .as_str()
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::UnexpectedResponse("No content in LLM response".to_string()))?;

        Ok(content.to_string())
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.call_llm(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let client = LlmClient::new(
            "sk-test".to_string(),
            "http://localhost:9999/v1/".to_string(),
            DEFAULT_MODEL.to_string(),
        );
        assert_eq!(client.base_url(), "http://localhost:9999/v1");

        let request = CompletionRequest {
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            temperature: 0.1,
            max_tokens: 300,
            json_object: true,
        };
        let body = client.request_body(&request);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(body["max_tokens"], 300);
        assert_eq!(body["response_format"]["type"], "json_object");

        let plain = CompletionRequest {
            json_object: false,
            ..request
        };
        assert!(client.request_body(&plain).get("response_format").is_none());
    }
}
