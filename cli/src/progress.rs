//! Progress reporting for workflow execution

use chorus_application::ports::progress::ProgressNotifier;
use chorus_domain::WorkflowPhase;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a chorus run with a console progress bar
pub struct ProgressReporter {
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &WorkflowPhase) -> &'static str {
        match phase {
            WorkflowPhase::Dispatch => "Phase 1: Fan-out",
            WorkflowPhase::Consolidation => "Phase 2: Consolidation",
            WorkflowPhase::Done => "Done",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &WorkflowPhase, total_tasks: usize) {
        let bar = ProgressBar::new(total_tasks as u64);
        bar.set_style(Self::phase_style());
        bar.set_prefix(Self::phase_display_name(phase));
        *self.phase_bar.lock().unwrap() = Some(bar);
    }

    fn on_task_complete(&self, _phase: &WorkflowPhase, source_id: &str, success: bool) {
        if let Some(bar) = self.phase_bar.lock().unwrap().as_ref() {
            bar.inc(1);
            if success {
                bar.set_message(format!("{} {}", "ok".green(), source_id));
            } else {
                bar.set_message(format!("{} {}", "failed".red(), source_id));
            }
        }
    }

    fn on_phase_complete(&self, _phase: &WorkflowPhase) {
        if let Some(bar) = self.phase_bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}
