//! Progress notification port
//!
//! Defines the interface for reporting progress during workflow execution.

use chorus_domain::WorkflowPhase;

/// Callback for progress updates during a chorus run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, logs, ...).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &WorkflowPhase, total_tasks: usize);

    /// Called when a model invocation settles within a phase
    fn on_task_complete(&self, phase: &WorkflowPhase, source_id: &str, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &WorkflowPhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &WorkflowPhase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &WorkflowPhase, _source_id: &str, _success: bool) {}
    fn on_phase_complete(&self, _phase: &WorkflowPhase) {}
}
