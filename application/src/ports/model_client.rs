//! Model client port
//!
//! Defines the interface for querying a single LLM backend.

use crate::config::QueryParams;
use async_trait::async_trait;
use chorus_domain::ModelOutcome;
use thiserror::Error;

/// Errors that can occur while querying a model backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// A client for one LLM backend
///
/// This port defines how the application layer talks to model providers.
/// Implementations (adapters) live in the infrastructure layer, one per
/// provider. The orchestrator holds a collection of these trait objects
/// and never inspects the concrete type.
///
/// # Contract
///
/// `query` performs exactly one outbound round trip. It never retries on
/// its own (retry is layered on top, see [`crate::retry`]) and never
/// fabricates a success: any transport, authentication, or backend error
/// surfaces as a [`ClientError`]. Backends honor the [`QueryParams`]
/// fields they understand and ignore the rest.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Stable identifier used to label this client's outcomes
    fn source_id(&self) -> &str;

    /// Send a prompt to the backend and return its normalized outcome
    async fn query(&self, prompt: &str, params: &QueryParams) -> Result<ModelOutcome, ClientError>;
}
