//! Orchestration value objects - immutable result types for chorus runs.
//!
//! These types represent the outputs of a workflow execution:
//! - [`ModelOutcome`] - Normalized result of one model invocation
//! - [`WorkflowMetadata`] - Timing and participant bookkeeping
//! - [`WorkflowResult`] - Complete envelope returned to the caller

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized result of a single model invocation.
///
/// Exactly one branch is meaningful: a successful outcome has non-empty
/// `content` and no `failure`; a failed outcome has empty `content` and a
/// `failure` description. Outcomes are created once, after the retry
/// sequence for the invocation has settled, and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelOutcome {
    /// Identifier of the model that produced this outcome
    pub source_id: String,
    /// The response content (empty on failure)
    pub content: String,
    /// Provider-reported metadata (token usage, stop reason, ...)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Error description if the invocation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl ModelOutcome {
    /// Creates a successful outcome.
    pub fn success(source_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            content: content.into(),
            metadata: HashMap::new(),
            failure: None,
        }
    }

    /// Creates a failed outcome with an error description.
    pub fn failure(source_id: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            content: String::new(),
            metadata: HashMap::new(),
            failure: Some(failure.into()),
        }
    }

    /// Attaches provider metadata to the outcome.
    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns `true` if the invocation succeeded.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Timing and participant metadata for a completed workflow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    /// Wall-clock duration of the whole run in seconds
    pub duration_seconds: f64,
    /// RFC 3339 UTC timestamp of when the run started
    pub started_at: String,
    /// Identifiers of the fanned-out models, in configured order
    pub queried_source_ids: Vec<String>,
    /// Identifier of the model that performed consolidation
    pub consolidator_id: String,
}

/// Complete result of one workflow execution.
///
/// `individual_outcomes` preserves the configured model order regardless of which
/// backend answered first. The envelope is assembled once per run and
/// not persisted by the core; callers serialize it as they see fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// The original prompt
    pub prompt: String,
    /// One outcome per configured model, in configured order
    pub individual_outcomes: Vec<ModelOutcome>,
    /// The consolidated outcome from the consolidator model
    pub consolidated_outcome: ModelOutcome,
    /// Run metadata
    pub metadata: WorkflowMetadata,
}

impl WorkflowResult {
    pub fn new(
        prompt: impl Into<String>,
        individual_outcomes: Vec<ModelOutcome>,
        consolidated_outcome: ModelOutcome,
        metadata: WorkflowMetadata,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            individual_outcomes,
            consolidated_outcome,
            metadata,
        }
    }

    /// Returns an iterator over only the successful outcomes.
    pub fn successful_outcomes(&self) -> impl Iterator<Item = &ModelOutcome> {
        self.individual_outcomes.iter().filter(|o| o.is_success())
    }

    /// Returns an iterator over only the failed outcomes.
    pub fn failed_outcomes(&self) -> impl Iterator<Item = &ModelOutcome> {
        self.individual_outcomes.iter().filter(|o| !o.is_success())
    }

    /// Returns `true` if every fanned-out model and the consolidator succeeded.
    pub fn is_fully_successful(&self) -> bool {
        self.consolidated_outcome.is_success()
            && self.individual_outcomes.iter().all(|o| o.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_outcome_has_no_failure() {
        let outcome = ModelOutcome::success("claude-sonnet-4-5", "Paris");
        assert!(outcome.is_success());
        assert_eq!(outcome.content, "Paris");
        assert!(outcome.failure.is_none());
    }

    #[test]
    fn failed_outcome_has_empty_content() {
        let outcome = ModelOutcome::failure("gpt-5", "connection reset");
        assert!(!outcome.is_success());
        assert!(outcome.content.is_empty());
        assert_eq!(outcome.failure.as_deref(), Some("connection reset"));
    }

    #[test]
    fn outcome_metadata_attachment() {
        let metadata: HashMap<_, _> = [("output_tokens".to_string(), serde_json::json!(42))]
            .into_iter()
            .collect();
        let outcome = ModelOutcome::success("gpt-5", "hi").with_metadata(metadata);
        assert_eq!(outcome.metadata["output_tokens"], serde_json::json!(42));
    }

    #[test]
    fn result_partitions_outcomes() {
        let result = WorkflowResult::new(
            "q",
            vec![
                ModelOutcome::success("a", "yes"),
                ModelOutcome::failure("b", "timeout"),
            ],
            ModelOutcome::success("c", "synthesis"),
            WorkflowMetadata {
                duration_seconds: 1.5,
                started_at: "2026-01-01T00:00:00Z".to_string(),
                queried_source_ids: vec!["a".to_string(), "b".to_string()],
                consolidator_id: "c".to_string(),
            },
        );
        assert_eq!(result.successful_outcomes().count(), 1);
        assert_eq!(result.failed_outcomes().count(), 1);
        assert!(!result.is_fully_successful());
    }

    #[test]
    fn result_serializes_with_contract_field_names() {
        let result = WorkflowResult::new(
            "q",
            vec![ModelOutcome::success("a", "yes")],
            ModelOutcome::success("c", "synthesis"),
            WorkflowMetadata {
                duration_seconds: 0.5,
                started_at: "2026-01-01T00:00:00Z".to_string(),
                queried_source_ids: vec!["a".to_string()],
                consolidator_id: "c".to_string(),
            },
        );
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("individual_outcomes").is_some());
        assert!(json.get("consolidated_outcome").is_some());
        assert!(json["metadata"].get("queried_source_ids").is_some());
        assert!(json["metadata"].get("consolidator_id").is_some());
    }

    #[test]
    fn failed_outcome_serializes_without_metadata_key() {
        let json = serde_json::to_value(ModelOutcome::failure("b", "timeout")).unwrap();
        assert!(json.get("metadata").is_none());
        assert_eq!(json["failure"], "timeout");
    }
}
