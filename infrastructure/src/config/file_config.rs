//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use chorus_application::QueryParams;
use chorus_domain::Model;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("at least one model must be configured")]
    NoModels,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("max_tokens cannot be 0")]
    InvalidMaxTokens,
}

/// Raw chorus configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChorusConfig {
    /// Models to fan the prompt out to
    pub models: Vec<String>,
    /// Model used for consolidation
    pub consolidator: Model,
}

impl Default for FileChorusConfig {
    fn default() -> Self {
        Self {
            models: Model::default_models()
                .iter()
                .map(|m| m.to_string())
                .collect(),
            consolidator: Model::default_consolidator(),
        }
    }
}

/// Raw query parameter configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQueryConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for FileQueryConfig {
    fn default() -> Self {
        let params = QueryParams::default();
        Self {
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

/// Complete file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub chorus: FileChorusConfig,
    pub query: FileQueryConfig,
}

impl FileConfig {
    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.chorus.models.is_empty() {
            return Err(ConfigValidationError::NoModels);
        }
        if self.chorus.models.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.query.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }
        Ok(())
    }

    /// Parse the configured model names into domain models
    pub fn models(&self) -> Vec<Model> {
        self.chorus
            .models
            .iter()
            .map(|s| s.parse().unwrap())
            .collect()
    }

    /// Fan-out query parameters from the `[query]` section
    pub fn query_params(&self) -> QueryParams {
        QueryParams::default()
            .with_temperature(self.query.temperature)
            .with_max_tokens(self.query.max_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.models().is_empty());
        assert_eq!(config.query_params(), QueryParams::default());
    }

    #[test]
    fn empty_model_list_is_rejected() {
        let mut config = FileConfig::default();
        config.chorus.models.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::NoModels)
        ));
    }

    #[test]
    fn blank_model_name_is_rejected() {
        let mut config = FileConfig::default();
        config.chorus.models.push("  ".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }

    #[test]
    fn toml_roundtrip() {
        let toml = r#"
            [chorus]
            models = ["claude-haiku-4-5", "gpt-5-mini"]
            consolidator = "claude-sonnet-4-5"

            [query]
            temperature = 0.2
            max_tokens = 1024
        "#;
        let config: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.models(), vec![Model::ClaudeHaiku45, Model::Gpt5Mini]);
        assert_eq!(config.chorus.consolidator, Model::ClaudeSonnet45);
        assert_eq!(config.query.temperature, 0.2);
    }
}
