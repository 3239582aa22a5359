//! Application use cases

pub mod run_workflow;

pub use run_workflow::{RunWorkflowError, RunWorkflowInput, RunWorkflowUseCase};
