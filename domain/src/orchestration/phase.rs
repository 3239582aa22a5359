//! Workflow phases

/// Phases of a chorus workflow run.
///
/// Transitions are strictly forward: `Dispatch` → `Consolidation` → `Done`.
/// `Done` is terminal; callers only observe a result once it is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    /// Fan-out phase - all models answer the prompt in parallel
    Dispatch,
    /// Consolidation phase - the consolidator synthesizes the outcomes
    Consolidation,
    /// Terminal state - the result envelope is assembled
    Done,
}

impl WorkflowPhase {
    pub fn as_str(&self) -> &str {
        match self {
            WorkflowPhase::Dispatch => "dispatch",
            WorkflowPhase::Consolidation => "consolidation",
            WorkflowPhase::Done => "done",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            WorkflowPhase::Dispatch => "Fan-out",
            WorkflowPhase::Consolidation => "Consolidation",
            WorkflowPhase::Done => "Done",
        }
    }
}

impl std::fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
