//! Prompt value object

use serde::{Deserialize, Serialize};

/// The user prompt fanned out to every model (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    content: String,
}

impl Prompt {
    /// Create a new prompt
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Prompt cannot be empty");
        Self { content }
    }

    /// Try to create a new prompt, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Prompt {
    fn from(s: &str) -> Self {
        Prompt::new(s)
    }
}

impl From<String> for Prompt {
    fn from(s: String) -> Self {
        Prompt::new(s)
    }
}
