//! Progress reporting for workflow execution

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use subquery_application::ports::progress::ProgressNotifier;
use subquery_domain::Phase;
use subquery_domain::core::string::preview;

const LABEL_WIDTH: usize = 50;

/// Reports progress during a workflow run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &Phase) -> String {
        format!("Phase {}: {}", phase.number(), phase.display_name())
    }

    fn phase_short_name(phase: &Phase) -> String {
        format!("Phase {}", phase.number())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, label: &str, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let label = preview(label, LABEL_WIDTH);
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} complete!", Self::phase_short_name(phase).green()));
        }
    }

    fn on_attempt_failed(&self, index: usize, attempt: u32, error: &str) {
        let line = format!(
            "  {} sub-question {} attempt {}: {}",
            "!".yellow(),
            index + 1,
            attempt,
            preview(error, LABEL_WIDTH)
        );
        // println through the MultiProgress so the bars are not torn
        let _ = self.multi.println(line);
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let phase_name = ProgressReporter::phase_display_name(phase);
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase_name.bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, label: &str, success: bool) {
        let label = preview(label, LABEL_WIDTH);
        if success {
            eprintln!("  {} {}", "v".green(), label);
        } else {
            eprintln!("  {} {} (no response found)", "x".red(), label);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        eprintln!();
    }

    fn on_attempt_failed(&self, index: usize, attempt: u32, error: &str) {
        eprintln!(
            "  {} sub-question {} attempt {} failed: {}",
            "!".yellow(),
            index + 1,
            attempt,
            preview(error, LABEL_WIDTH)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        assert_eq!(
            ProgressReporter::phase_display_name(&Phase::Answer),
            "Phase 2: Sub-question Answers"
        );
        assert_eq!(ProgressReporter::phase_short_name(&Phase::Synthesize), "Phase 3");
    }

    #[test]
    fn test_reporter_tracks_phase_bar() {
        let reporter = ProgressReporter::new();
        reporter.on_phase_start(&Phase::Answer, 2);
        reporter.on_task_complete(&Phase::Answer, "How did Bank A do?", true);
        reporter.on_task_complete(&Phase::Answer, "How did Bank B do?", false);
        assert_eq!(
            reporter
                .phase_bar
                .lock()
                .unwrap()
                .as_ref()
                .map(|pb| pb.position()),
            Some(2)
        );
        reporter.on_phase_complete(&Phase::Answer);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
