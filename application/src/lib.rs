//! Application layer for model-chorus
//!
//! Use cases and ports. The orchestration logic lives here: parallel
//! fan-out with failure isolation, bounded retry with backoff, and the
//! consolidation pass. Concrete model clients are injected through the
//! [`ports::ModelClient`] port by the infrastructure layer.

pub mod config;
pub mod ports;
pub mod retry;
pub mod use_cases;

pub use config::QueryParams;
pub use ports::{ClientError, ModelClient, NoProgress, ProgressNotifier};
pub use retry::{RetryPolicy, query_with_retry};
pub use use_cases::{RunWorkflowError, RunWorkflowInput, RunWorkflowUseCase};
