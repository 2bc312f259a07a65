//! Diagnostic sink that forwards records to `tracing`.

use tracing::info;

use crate::traits::DiagnosticSink;

/// Target under which diagnostic records are emitted.
pub const DIAGNOSTIC_TARGET: &str = "gatekeeper::diagnostic";

/// Forwards every diagnostic record as an `INFO` event on [`DIAGNOSTIC_TARGET`].
///
/// Filter them with `RUST_LOG=gatekeeper::diagnostic=info` or silence them
/// with `RUST_LOG=gatekeeper::diagnostic=off`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&mut self, text: &str) {
        info!(target: DIAGNOSTIC_TARGET, "{}", text);
    }
}
