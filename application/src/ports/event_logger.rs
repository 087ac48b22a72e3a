//! Port for structured workflow event logging.
//!
//! Defines the [`WorkflowEventLogger`] trait for recording workflow events
//! (decomposition, failed attempts, answers, synthesis) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port keeps a
//! machine-readable record (JSONL) of what each run did.

use serde_json::Value;

/// A structured workflow event for logging.
pub struct WorkflowEvent {
    /// Event type identifier (e.g., "decomposed", "attempt_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl WorkflowEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging workflow events to a structured log.
///
/// The `log` method is synchronous and non-fallible; write failures are the
/// adapter's concern and never interrupt a run.
pub trait WorkflowEventLogger: Send + Sync {
    /// Record a workflow event.
    fn log(&self, event: WorkflowEvent);
}

/// No-op implementation for tests and when event logging is disabled.
pub struct NoWorkflowLogger;

impl WorkflowEventLogger for NoWorkflowLogger {
    fn log(&self, _event: WorkflowEvent) {}
}
