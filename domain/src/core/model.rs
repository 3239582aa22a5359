//! Model value object representing an LLM backend

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// This is a domain concept identifying the backends that can
/// participate in a chorus run. The variant set covers the providers
/// shipped in the infrastructure layer; anything else is `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Claude models
    ClaudeSonnet45,
    ClaudeHaiku45,
    ClaudeOpus41,
    ClaudeHaiku3,
    // GPT models
    Gpt5,
    Gpt5Mini,
    Gpt41,
    Gpt4o,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ClaudeSonnet45 => "claude-sonnet-4-5",
            Model::ClaudeHaiku45 => "claude-haiku-4-5",
            Model::ClaudeOpus41 => "claude-opus-4-1",
            Model::ClaudeHaiku3 => "claude-3-haiku-20240307",
            Model::Gpt5 => "gpt-5",
            Model::Gpt5Mini => "gpt-5-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt4o => "gpt-4o",
            Model::Custom(s) => s,
        }
    }

    /// Get the default fan-out set for a chorus run
    pub fn default_models() -> Vec<Model> {
        vec![Model::ClaudeSonnet45, Model::Gpt5]
    }

    /// Default model used for consolidation
    pub fn default_consolidator() -> Model {
        Model::ClaudeSonnet45
    }

    /// Check if this is a Claude model
    pub fn is_claude(&self) -> bool {
        matches!(
            self,
            Model::ClaudeSonnet45 | Model::ClaudeHaiku45 | Model::ClaudeOpus41 | Model::ClaudeHaiku3
        ) || matches!(self, Model::Custom(s) if s.starts_with("claude-"))
    }

    /// Check if this is a GPT model
    pub fn is_gpt(&self) -> bool {
        matches!(
            self,
            Model::Gpt5 | Model::Gpt5Mini | Model::Gpt41 | Model::Gpt4o
        ) || matches!(self, Model::Custom(s) if s.starts_with("gpt-"))
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::ClaudeSonnet45
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "claude-sonnet-4-5" => Model::ClaudeSonnet45,
            "claude-haiku-4-5" => Model::ClaudeHaiku45,
            "claude-opus-4-1" => Model::ClaudeOpus41,
            "claude-3-haiku-20240307" => Model::ClaudeHaiku3,
            "gpt-5" => Model::Gpt5,
            "gpt-5-mini" => Model::Gpt5Mini,
            "gpt-4.1" => Model::Gpt41,
            "gpt-4o" => Model::Gpt4o,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in Model::default_models() {
            let s = model.to_string();
            let parsed: Model = s.parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "local-llama-70b".parse().unwrap();
        assert_eq!(model, Model::Custom("local-llama-70b".to_string()));
        assert_eq!(model.to_string(), "local-llama-70b");
    }

    #[test]
    fn test_model_family_detection() {
        assert!(Model::ClaudeSonnet45.is_claude());
        assert!(Model::Gpt5.is_gpt());
        assert!(!Model::ClaudeSonnet45.is_gpt());

        let custom: Model = "claude-next".parse().unwrap();
        assert!(custom.is_claude());
    }
}
