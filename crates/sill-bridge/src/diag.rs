//! Default diagnostic sink.

use sill_sdk::DiagnosticSink;

/// Sink that forwards absorbed faults to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn fault(&self, context: &str, error: &dyn std::error::Error) {
        tracing::warn!(context, error = %error, "bridge absorbed a native fault");
    }
}
