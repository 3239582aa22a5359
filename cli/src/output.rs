//! Console output formatting for workflow results

use chorus_domain::WorkflowResult;
use colored::Colorize;

/// Formats workflow results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete workflow result
    pub fn format(result: &WorkflowResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Model Chorus Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Prompt:".cyan().bold(), result.prompt));

        output.push_str(&format!(
            "{} {}\n",
            "Models:".cyan().bold(),
            result.metadata.queried_source_ids.join(", ")
        ));

        output.push_str(&Self::section_header("Individual Answers"));
        for outcome in &result.individual_outcomes {
            if outcome.is_success() {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", outcome.source_id).yellow().bold(),
                    outcome.content
                ));
            } else {
                output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    format!("── {} ──", outcome.source_id).red().bold(),
                    outcome.failure.as_deref().unwrap_or("Unknown")
                ));
            }
        }

        output.push_str(&Self::section_header("Consolidated Answer"));
        if result.consolidated_outcome.is_success() {
            output.push_str(&format!(
                "\n{}\n\n{}\n",
                format!("Consolidator: {}", result.metadata.consolidator_id)
                    .yellow()
                    .bold(),
                result.consolidated_outcome.content
            ));
        } else {
            output.push_str(&format!(
                "\n{}\nError: {}\n",
                format!("Consolidator: {}", result.metadata.consolidator_id)
                    .red()
                    .bold(),
                result.consolidated_outcome.failure.as_deref().unwrap_or("Unknown")
            ));
        }

        output.push_str(&format!(
            "\n{}\n",
            format!("Completed in {:.2}s", result.metadata.duration_seconds).dimmed()
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format the consolidated answer only (concise output)
    pub fn format_consolidated_only(result: &WorkflowResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Consolidated Answer ===".cyan().bold()));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), result.prompt));

        output.push_str(&format!(
            "{} {}\n\n",
            "Models consulted:".dimmed(),
            result.metadata.queried_source_ids.join(", ")
        ));

        let failed: Vec<_> = result.failed_outcomes().map(|o| o.source_id.as_str()).collect();
        if !failed.is_empty() {
            output.push_str(&format!(
                "{} {}\n\n",
                "Failed:".red().bold(),
                failed.join(", ")
            ));
        }

        match &result.consolidated_outcome.failure {
            None => output.push_str(&result.consolidated_outcome.content),
            Some(failure) => {
                output.push_str(&format!("{} {}", "Consolidation failed:".red().bold(), failure))
            }
        }
        output.push('\n');

        output
    }

    /// Format as JSON
    pub fn format_json(result: &WorkflowResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
