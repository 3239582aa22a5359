//! Domain layer for model-chorus
//!
//! This crate contains the core entities and value objects for the
//! fan-out / consolidation workflow. It has no dependencies on
//! infrastructure or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! - **Fan-out**: the same prompt is dispatched to multiple independent
//!   model backends in parallel.
//! - **Consolidation**: a designated model synthesizes the collected
//!   outcomes into a single answer.
//! - **Outcome**: the normalized result of one model invocation,
//!   success or failure, never a raw error.

pub mod core;
pub mod orchestration;
pub mod prompt;

// Re-export commonly used types
pub use core::{Model, Prompt};
pub use orchestration::{ModelOutcome, WorkflowMetadata, WorkflowPhase, WorkflowResult};
pub use prompt::ConsolidationTemplate;
