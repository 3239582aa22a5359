//! Infrastructure layer for model-chorus
//!
//! External adapters: HTTP clients for the supported model providers
//! and TOML configuration loading. Everything here implements ports
//! defined in the application layer.

pub mod config;
pub mod providers;

pub use config::{ConfigLoader, FileConfig};
pub use providers::{AnthropicClient, OpenAiClient, ProviderError, ProviderKind, build_client};
