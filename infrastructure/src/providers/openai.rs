//! OpenAI provider adapter
//!
//! Implements [`ModelClient`] against the Chat Completions API.

use async_trait::async_trait;
use chorus_application::ports::model_client::{ClientError, ModelClient};
use chorus_application::QueryParams;
use chorus_domain::{Model, ModelOutcome};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for OpenAI (GPT) models
pub struct OpenAiClient {
    client: reqwest::Client,
    api_base: String,
    model: Model,
    source_id: String,
}

impl OpenAiClient {
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
                "OpenAI API key is empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key.trim())).map_err(|e| {
                ClientError::AuthenticationError(format!("invalid API key header: {e}"))
            })?,
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

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    fn request_body(&self, prompt: &str, params: &QueryParams) -> serde_json::Value {
        json!({
            "model": self.model.as_str(),
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        })
    }
}

#[derive(Deserialize)]
struct CompletionsResponse {
    choices: Vec<CompletionsChoice>,
    #[serde(default)]
    usage: Option<CompletionsUsage>,
}

#[derive(Deserialize)]
struct CompletionsChoice {
    message: CompletionsMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CompletionsMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct CompletionsUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

fn parse_completions_response(raw: &str, source_id: &str) -> Result<ModelOutcome, ClientError> {
    let response: CompletionsResponse = serde_json::from_str(raw)
        .map_err(|e| ClientError::InvalidResponse(format!("malformed response body: {e}")))?;

    let choice = response
        .choices
        .first()
        .ok_or_else(|| ClientError::InvalidResponse("response contained no choices".to_string()))?;

    let text = choice.message.content.clone().unwrap_or_default();
    if text.is_empty() {
        return Err(ClientError::InvalidResponse(
            "response contained no message content".to_string(),
        ));
    }

    let mut metadata = HashMap::new();
    if let Some(usage) = response.usage {
        metadata.insert("input_tokens".to_string(), json!(usage.prompt_tokens));
        metadata.insert("output_tokens".to_string(), json!(usage.completion_tokens));
    }
    if let Some(finish_reason) = &choice.finish_reason {
        metadata.insert("stop_reason".to_string(), json!(finish_reason));
    }

    Ok(ModelOutcome::success(source_id, text).with_metadata(metadata))
}

#[async_trait]
impl ModelClient for OpenAiClient {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    async fn query(&self, prompt: &str, params: &QueryParams) -> Result<ModelOutcome, ClientError> {
        debug!(model = %self.model, "Sending OpenAI chat completions request");

        let response = self
            .client
            .post(self.completions_url())
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
            parse_completions_response(&raw, &self.source_id)
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

    fn client() -> OpenAiClient {
        OpenAiClient::new("test-key", Model::Gpt5).unwrap()
    }

    #[test]
    fn rejects_empty_api_key() {
        assert!(matches!(
            OpenAiClient::new("", Model::Gpt5),
            Err(ClientError::AuthenticationError(_))
        ));
    }

    #[test]
    fn request_body_carries_params() {
        let body = client().request_body("hi", &QueryParams::consolidation());
        assert_eq!(body["model"], "gpt-5");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["max_tokens"], 8192);
        assert_eq!(body["messages"][0]["content"], "hi");
    }

    #[test]
    fn parses_completions_response() {
        let raw = r#"{
            "choices": [{"message": {"content": "Paris."}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12}
        }"#;
        let outcome = parse_completions_response(raw, "gpt-5").unwrap();
        assert_eq!(outcome.content, "Paris.");
        assert_eq!(outcome.metadata["input_tokens"], json!(9));
        assert_eq!(outcome.metadata["stop_reason"], json!("stop"));
    }

    #[test]
    fn missing_choices_is_invalid() {
        assert!(matches!(
            parse_completions_response(r#"{"choices": []}"#, "gpt-5"),
            Err(ClientError::InvalidResponse(_))
        ));
    }
}
