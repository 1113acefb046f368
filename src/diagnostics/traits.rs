//! Diagnostic sink trait definition

/// Receives human-readable messages from non-fatal failure paths
///
/// The store reports here in addition to returning an error, so callers that
/// only look at logs still see read, delete and clear failures.
pub trait DiagnosticSink: Send + Sync {
    /// Record a single message
    fn report(&self, message: &str);
}

/// Forwards messages to `tracing` at warn level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, message: &str) {
        tracing::warn!(target: "stowage", "{}", message);
    }
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _message: &str) {}
}
