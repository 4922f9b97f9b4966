//! Event sink forwarding entries to the tracing subscriber.

use logreaper_domain::{EventSink, Severity};

/// [`EventSink`] implementation that writes entries through tracing.
///
/// Stands in for the host event log: Info entries become info-level
/// events, Error entries error-level, under the `eventlog` target so
/// they can be filtered separately from internal diagnostics.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new sink.
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn append(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!(target: "eventlog", "{}", message),
            Severity::Error => tracing::error!(target: "eventlog", "{}", message),
        }
    }
}
