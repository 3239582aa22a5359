//! Run Workflow use case
//!
//! Orchestrates the full fan-out / consolidation flow: dispatch the
//! prompt to every configured model in parallel, then have the
//! consolidator synthesize the collected outcomes.

use crate::config::QueryParams;
use crate::ports::model_client::ModelClient;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::retry::{RetryPolicy, query_with_retry};
use chorus_domain::{
    ConsolidationTemplate, ModelOutcome, Prompt, WorkflowMetadata, WorkflowPhase, WorkflowResult,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that abort a workflow before any model is queried.
///
/// These are precondition violations. Individual model failures never
/// surface here; they are carried as data inside the [`WorkflowResult`].
#[derive(Error, Debug)]
pub enum RunWorkflowError {
    #[error("No models configured")]
    NoClients,
}

/// Input for the RunWorkflow use case
#[derive(Debug, Clone)]
pub struct RunWorkflowInput {
    /// The prompt to fan out
    pub prompt: Prompt,
    /// Generation parameters for the fan-out phase (consolidation uses
    /// its own fixed parameters)
    pub params: QueryParams,
}

impl RunWorkflowInput {
    pub fn new(prompt: impl Into<Prompt>) -> Self {
        Self {
            prompt: prompt.into(),
            params: QueryParams::default(),
        }
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for running a chorus workflow
pub struct RunWorkflowUseCase {
    clients: Vec<Arc<dyn ModelClient>>,
    consolidator: Arc<dyn ModelClient>,
    retry: RetryPolicy,
}

impl RunWorkflowUseCase {
    pub fn new(clients: Vec<Arc<dyn ModelClient>>, consolidator: Arc<dyn ModelClient>) -> Self {
        Self {
            clients,
            consolidator,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunWorkflowInput) -> Result<WorkflowResult, RunWorkflowError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunWorkflowInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<WorkflowResult, RunWorkflowError> {
        if self.clients.is_empty() {
            return Err(RunWorkflowError::NoClients);
        }

        let started_at = chrono::Utc::now();
        let start = Instant::now();

        info!("Starting chorus run with {} models", self.clients.len());

        // Phase 1: fan-out
        let outcomes = self.phase_dispatch(&input, progress).await;

        // Phase 2: consolidation
        let consolidated = self.phase_consolidation(&input, &outcomes, progress).await;

        debug!(phase = %WorkflowPhase::Done, "Workflow complete");

        let metadata = WorkflowMetadata {
            duration_seconds: start.elapsed().as_secs_f64(),
            started_at: started_at.to_rfc3339(),
            queried_source_ids: self
                .clients
                .iter()
                .map(|c| c.source_id().to_string())
                .collect(),
            consolidator_id: self.consolidator.source_id().to_string(),
        };

        Ok(WorkflowResult::new(
            input.prompt.into_content(),
            outcomes,
            consolidated,
            metadata,
        ))
    }

    /// Phase 1: query all models in parallel.
    ///
    /// One task per client, joined as a barrier: every invocation runs to
    /// a terminal state, and a failure in one never cancels or taints a
    /// sibling. Results are written into index-addressed slots so the
    /// output order matches the configured client order, not completion
    /// order. The returned vector always has one outcome per client.
    async fn phase_dispatch(
        &self,
        input: &RunWorkflowInput,
        progress: &dyn ProgressNotifier,
    ) -> Vec<ModelOutcome> {
        info!("Phase 1: Fan-out");
        progress.on_phase_start(&WorkflowPhase::Dispatch, self.clients.len());

        let mut join_set = JoinSet::new();

        for (index, client) in self.clients.iter().enumerate() {
            let client = Arc::clone(client);
            let prompt = input.prompt.content().to_string();
            let params = input.params;
            let retry = self.retry;

            join_set.spawn(async move {
                let result = query_with_retry(client.as_ref(), &prompt, &params, &retry).await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<ModelOutcome>> = (0..self.clients.len()).map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, Ok(outcome))) => {
                    info!("Model {} responded successfully", outcome.source_id);
                    progress.on_task_complete(&WorkflowPhase::Dispatch, &outcome.source_id, true);
                    slots[index] = Some(outcome);
                }
                Ok((index, Err(e))) => {
                    let source_id = self.clients[index].source_id();
                    warn!("Model {} failed: {}", source_id, e);
                    progress.on_task_complete(&WorkflowPhase::Dispatch, source_id, false);
                    slots[index] = Some(ModelOutcome::failure(source_id, e.to_string()));
                }
                Err(e) => {
                    // Panicked or aborted task; its slot is filled below.
                    warn!("Task join error: {}", e);
                }
            }
        }

        progress.on_phase_complete(&WorkflowPhase::Dispatch);

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    ModelOutcome::failure(
                        self.clients[index].source_id(),
                        "invocation task did not complete",
                    )
                })
            })
            .collect()
    }

    /// Phase 2: have the consolidator synthesize all outcomes.
    ///
    /// The consolidation prompt is built even when every fan-out outcome
    /// failed; the error markers are material for the consolidator to
    /// report on. A consolidator failure is itself reported as a failed
    /// outcome, never as a workflow error.
    async fn phase_consolidation(
        &self,
        input: &RunWorkflowInput,
        outcomes: &[ModelOutcome],
        progress: &dyn ProgressNotifier,
    ) -> ModelOutcome {
        info!("Phase 2: Consolidation");
        progress.on_phase_start(&WorkflowPhase::Consolidation, 1);

        let consolidation_prompt = ConsolidationTemplate::render(input.prompt.content(), outcomes);

        let consolidated = match query_with_retry(
            self.consolidator.as_ref(),
            &consolidation_prompt,
            &QueryParams::consolidation(),
            &self.retry,
        )
        .await
        {
            Ok(outcome) => {
                info!("Consolidator {} responded", outcome.source_id);
                progress.on_task_complete(&WorkflowPhase::Consolidation, &outcome.source_id, true);
                outcome
            }
            Err(e) => {
                let source_id = self.consolidator.source_id();
                warn!("Consolidator {} failed: {}", source_id, e);
                progress.on_task_complete(&WorkflowPhase::Consolidation, source_id, false);
                ModelOutcome::failure(source_id, e.to_string())
            }
        };

        progress.on_phase_complete(&WorkflowPhase::Consolidation);
        consolidated
    }
}
