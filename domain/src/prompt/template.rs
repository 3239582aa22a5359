//! Prompt template for the consolidation phase

use crate::orchestration::ModelOutcome;

/// Template for building the consolidation prompt.
///
/// Rendering is a pure function: the same prompt and outcome sequence
/// always produce byte-identical text. Failed outcomes are rendered as
/// explicit error markers so the consolidator can reason about gaps
/// instead of seeing empty sections.
pub struct ConsolidationTemplate;

impl ConsolidationTemplate {
    /// Fixed instruction header for the synthesis task
    pub fn header() -> &'static str {
        "You are tasked with consolidating and synthesizing responses from multiple AI models."
    }

    /// Build the full consolidation prompt from the original prompt and
    /// the per-model outcomes, in input order.
    pub fn render(original_prompt: &str, outcomes: &[ModelOutcome]) -> String {
        let mut prompt = format!(
            r#"{}

Original prompt:
"{}"

Responses from different models:
"#,
            Self::header(),
            original_prompt
        );

        for outcome in outcomes {
            match &outcome.failure {
                Some(failure) => {
                    prompt.push_str(&format!(
                        "\n### {}\n[Error occurred: {}]\n",
                        outcome.source_id, failure
                    ));
                }
                None => {
                    prompt.push_str(&format!(
                        "\n### {}\n{}\n",
                        outcome.source_id, outcome.content
                    ));
                }
            }
        }

        prompt.push_str(
            r#"
Please provide a comprehensive synthesis that:
1. Identifies key insights and agreements across models
2. Highlights important differences or unique perspectives
3. Provides a balanced, nuanced final analysis
4. Preserves valuable details while maintaining clarity

Your synthesis:"#,
        );

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_outcomes() -> Vec<ModelOutcome> {
        vec![
            ModelOutcome::success("Model A", "Paris is the capital of France."),
            ModelOutcome::failure("Model B", "timeout"),
        ]
    }

    #[test]
    fn render_is_deterministic() {
        let outcomes = sample_outcomes();
        let first = ConsolidationTemplate::render("What is the capital of France?", &outcomes);
        let second = ConsolidationTemplate::render("What is the capital of France?", &outcomes);
        assert_eq!(first, second);
    }

    #[test]
    fn render_quotes_original_prompt() {
        let rendered = ConsolidationTemplate::render("What is 2+2?", &sample_outcomes());
        assert!(rendered.contains("\"What is 2+2?\""));
        assert!(rendered.starts_with(ConsolidationTemplate::header()));
    }

    #[test]
    fn render_includes_content_and_error_marker() {
        let rendered = ConsolidationTemplate::render("q", &sample_outcomes());
        assert!(rendered.contains("### Model A\nParis is the capital of France."));
        assert!(rendered.contains("### Model B\n[Error occurred: timeout]"));
        // The failed section carries a marker, not a stringified null or
        // an empty body.
        assert!(!rendered.contains("None"));
        assert!(!rendered.contains("### Model B\n\n"));
    }

    #[test]
    fn render_preserves_outcome_order() {
        let rendered = ConsolidationTemplate::render("q", &sample_outcomes());
        let a = rendered.find("### Model A").unwrap();
        let b = rendered.find("### Model B").unwrap();
        assert!(a < b);
    }

    #[test]
    fn render_with_all_failures_still_builds() {
        let outcomes = vec![
            ModelOutcome::failure("Model A", "rate limited"),
            ModelOutcome::failure("Model B", "connection reset"),
        ];
        let rendered = ConsolidationTemplate::render("q", &outcomes);
        assert!(rendered.contains("[Error occurred: rate limited]"));
        assert!(rendered.contains("[Error occurred: connection reset]"));
        assert!(rendered.ends_with("Your synthesis:"));
    }
}
