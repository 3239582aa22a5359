//! Anthropic provider adapter
//!
//! Implements [`ModelClient`] against the Anthropic Messages API.

use async_trait::async_trait;
use chorus_application::ports::model_client::{ClientError, ModelClient};
use chorus_application::QueryParams;
use chorus_domain::{Model, ModelOutcome};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for Anthropic (Claude) models
pub struct AnthropicClient {
    client: reqwest::Client,
    api_base: String,
    model: Model,
    source_id: String,
}

impl AnthropicClient {
    pub fn new(api_key: &str, model: Model) -> Result<Self, ClientError> {
        Self::with_api_base(api_key, model, DEFAULT_API_BASE)
    }

    /// Create a client pointed at a non-default API base (for proxies
    /// and tests).
    pub fn with_api_base(
        api_key: &str,
        model: Model,
        api_base: impl Into<String>,
    ) -> Result<Self, ClientError> {
        if api_key.trim().is_empty() {
            return Err(ClientError::AuthenticationError(
                "Anthropic API key is empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key.trim()).map_err(|e| {
                ClientError::AuthenticationError(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

        let source_id = model.to_string();
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model,
            source_id,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.api_base)
    }

    fn request_body(&self, prompt: &str, params: &QueryParams) -> serde_json::Value {
        json!({
            "model": self.model.as_str(),
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
            "messages": [{ "role": "user", "content": prompt }],
        })
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<MessagesContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<MessagesUsage>,
}

#[derive(Deserialize)]
struct MessagesContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct MessagesUsage {
    input_tokens: u64,
    output_tokens: u64,
}

fn parse_messages_response(raw: &str, source_id: &str) -> Result<ModelOutcome, ClientError> {
    let response: MessagesResponse = serde_json::from_str(raw)
        .map_err(|e| ClientError::InvalidResponse(format!("malformed response body: {e}")))?;

    let text: String = response
        .content
        .iter()
        .filter(|b| b.kind == "text")
        .map(|b| b.text.as_str())
        .collect();

    if text.is_empty() {
        return Err(ClientError::InvalidResponse(
            "response contained no text content".to_string(),
        ));
    }

    let mut metadata = HashMap::new();
    if let Some(usage) = response.usage {
        metadata.insert("input_tokens".to_string(), json!(usage.input_tokens));
        metadata.insert("output_tokens".to_string(), json!(usage.output_tokens));
    }
    if let Some(stop_reason) = response.stop_reason {
        metadata.insert("stop_reason".to_string(), json!(stop_reason));
    }

    Ok(ModelOutcome::success(source_id, text).with_metadata(metadata))
}

#[async_trait]
impl ModelClient for AnthropicClient {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    async fn query(&self, prompt: &str, params: &QueryParams) -> Result<ModelOutcome, ClientError> {
        debug!(model = %self.model, "Sending Anthropic messages request");

        let response = self
            .client
            .post(self.messages_url())
            .json(&self.request_body(prompt, params))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ClientError::ConnectionError(e.to_string())
                } else {
                    ClientError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

        if status.is_success() {
            parse_messages_response(&raw, &self.source_id)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(ClientError::AuthenticationError(format!("{status}: {raw}")))
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            Err(ClientError::RateLimited(raw))
        } else {
            Err(ClientError::RequestFailed(format!("{status}: {raw}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AnthropicClient {
        AnthropicClient::new("test-key", Model::ClaudeSonnet45).unwrap()
    }

    #[test]
    fn rejects_empty_api_key() {
        assert!(matches!(
            AnthropicClient::new("  ", Model::ClaudeSonnet45),
            Err(ClientError::AuthenticationError(_))
        ));
    }

    #[test]
    fn source_id_is_model_identifier() {
        assert_eq!(client().source_id(), "claude-sonnet-4-5");
    }

    #[test]
    fn request_body_carries_params() {
        let body = client().request_body("hello", &QueryParams::default().with_max_tokens(128));
        assert_eq!(body["model"], "claude-sonnet-4-5");
        assert_eq!(body["max_tokens"], 128);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
    }

    #[test]
    fn parses_messages_response() {
        let raw = r#"{
            "content": [{"type": "text", "text": "Paris."}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 5}
        }"#;
        let outcome = parse_messages_response(raw, "claude-sonnet-4-5").unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.content, "Paris.");
        assert_eq!(outcome.metadata["output_tokens"], json!(5));
        assert_eq!(outcome.metadata["stop_reason"], json!("end_turn"));
    }

    #[test]
    fn empty_content_is_invalid() {
        let raw = r#"{"content": []}"#;
        assert!(matches!(
            parse_messages_response(raw, "claude-sonnet-4-5"),
            Err(ClientError::InvalidResponse(_))
        ));
    }
}
