//! Orchestration domain
//!
//! Result types and phase bookkeeping for the fan-out / consolidation
//! workflow. The workflow logic itself lives in the application layer;
//! this module only defines the immutable values it produces.

pub mod phase;
pub mod value_objects;

pub use phase::WorkflowPhase;
pub use value_objects::{ModelOutcome, WorkflowMetadata, WorkflowResult};
