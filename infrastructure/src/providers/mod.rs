//! Provider adapters
//!
//! One [`ModelClient`] implementation per backend provider, plus the
//! factory that routes a [`Model`] to the right adapter based on its
//! model family.

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

use chorus_application::ports::model_client::{ClientError, ModelClient};
use chorus_domain::Model;
use std::sync::Arc;
use thiserror::Error;

/// The provider families the factory can route to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
}

impl ProviderKind {
    /// Environment variable holding this provider's API key
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Determine the provider for a model by its family
    pub fn for_model(model: &Model) -> Option<Self> {
        if model.is_claude() {
            Some(ProviderKind::Anthropic)
        } else if model.is_gpt() {
            Some(ProviderKind::OpenAi)
        } else {
            None
        }
    }
}

/// Errors that can occur while assembling provider clients
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No provider supports model: {0}")]
    UnsupportedModel(Model),

    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),

    #[error("Client construction failed: {0}")]
    ClientError(#[from] ClientError),
}

/// Build a client for `model`, reading the provider's API key from the
/// environment.
pub fn build_client(model: &Model) -> Result<Arc<dyn ModelClient>, ProviderError> {
    let kind = ProviderKind::for_model(model)
        .ok_or_else(|| ProviderError::UnsupportedModel(model.clone()))?;

    let api_key = std::env::var(kind.api_key_var())
        .map_err(|_| ProviderError::MissingApiKey(kind.api_key_var()))?;

    let client: Arc<dyn ModelClient> = match kind {
        ProviderKind::Anthropic => Arc::new(AnthropicClient::new(&api_key, model.clone())?),
        ProviderKind::OpenAi => Arc::new(OpenAiClient::new(&api_key, model.clone())?),
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_model_family() {
        assert_eq!(
            ProviderKind::for_model(&Model::ClaudeSonnet45),
            Some(ProviderKind::Anthropic)
        );
        assert_eq!(
            ProviderKind::for_model(&Model::Gpt5),
            Some(ProviderKind::OpenAi)
        );
        assert_eq!(
            ProviderKind::for_model(&Model::Custom("mistral-large".to_string())),
            None
        );
    }
}
