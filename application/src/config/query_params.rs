//! Query parameters - per-call generation settings.
//!
//! [`QueryParams`] is the fixed, enumerated set of options a backend may
//! honor. There is no open key-value map: a backend uses the fields it
//! understands and ignores the rest, and unknown options simply cannot
//! be expressed.

use serde::{Deserialize, Serialize};

/// Generation parameters for a single model query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,
    /// Maximum output length in tokens
    pub max_tokens: u32,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

impl QueryParams {
    /// Parameters for the consolidation call: lower temperature for a
    /// focused synthesis, and a longer output allowance than a single
    /// fan-out query.
    pub fn consolidation() -> Self {
        Self {
            temperature: 0.5,
            max_tokens: 8192,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
