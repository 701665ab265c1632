//! Port for the structured run journal.
//!
//! Defines the [`RunJournal`] trait for recording orchestration events (mode
//! detection, plans, guardrail removals, skipped steps, agent results) to a
//! machine-readable log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures what was decided and
//! what ran, one record per event.

use serde_json::Value;

/// A structured orchestration event.
pub struct JournalEvent {
    /// Event type identifier (e.g., "mode_detected", "agent_result").
    pub event_type: &'static str,
    /// Request the event belongs to.
    pub request_id: String,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl JournalEvent {
    pub fn new(event_type: &'static str, request_id: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type,
            request_id: request_id.into(),
            payload,
        }
    }
}

/// Port for journaling orchestration events.
///
/// `record` is synchronous and non-fallible; journal write failures never
/// interrupt a run.
pub trait RunJournal: Send + Sync {
    fn record(&self, event: JournalEvent);
}

/// No-op implementation for tests and when journaling is disabled.
pub struct NoRunJournal;

impl RunJournal for NoRunJournal {
    fn record(&self, _event: JournalEvent) {}
}
