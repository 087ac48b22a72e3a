//! Progress notification port
//!
//! Defines the interface for reporting progress during a workflow run.

use subquery_domain::Phase;

/// Callback for progress updates during a workflow run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain text, ...).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when a task completes within a phase
    ///
    /// `label` names the task (the sub-question for the answer phase).
    fn on_task_complete(&self, phase: &Phase, label: &str, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);

    /// Called when one attempt at answering a sub-question fails.
    ///
    /// `index` is the 0-based position of the sub-question.
    fn on_attempt_failed(&self, _index: usize, _attempt: u32, _error: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &Phase, _label: &str, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
