//! Diagnostic sink for absorbed faults
//!
//! No native fault may cross the host-object contract as a scripting-visible
//! exception; the bridge absorbs them and reports each one here instead.
//! Hosts install a sink at construction time; tests install a collecting one
//! to assert on containment.

/// Receiver for faults the bridge absorbed instead of propagating.
pub trait DiagnosticSink: Send + Sync {
    /// Record an absorbed fault. `context` names the operation that hit it,
    /// e.g. `get("Padding")`.
    fn fault(&self, context: &str, error: &dyn std::error::Error);
}

/// A sink that discards all reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn fault(&self, _context: &str, _error: &dyn std::error::Error) {}
}
