//! Diagnostic sinks for cache events.

/// Receives diagnostics from the cache. Injected at construction.
pub trait LogSink: Send + Sync {
    fn debug(&self, message: &str);
}

/// Forwards diagnostics to `tracing` under the `introspection` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "introspection", "{}", message);
    }
}
