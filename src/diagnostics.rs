//! Destinations for validation diagnostics.
//!
//! The validator never logs through a global; it reports each rejection to
//! the `DiagnosticSink` it was built with. `TracingSink` forwards to
//! `tracing`, `MemorySink` records messages so callers (tests, the CLI report)
//! can inspect exactly what was emitted.

use crate::validation::Rejection;
use std::sync::{Arc, Mutex};

/// Receives one call per rejection reason.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, plugin: &str, rejection: &Rejection);

    fn accepted(&self, _plugin: &str) {}
}

/// Emits diagnostics as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, plugin: &str, rejection: &Rejection) {
        tracing::warn!(plugin, "{rejection}");
    }

    fn accepted(&self, plugin: &str) {
        tracing::debug!(plugin, "extension accepted");
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub plugin: String,
    pub message: String,
}

/// Records every warning in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    /// Drain recorded diagnostics, leaving the sink empty.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.entries.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl DiagnosticSink for MemorySink {
    fn warn(&self, plugin: &str, rejection: &Rejection) {
        self.lock().push(Diagnostic {
            plugin: plugin.to_string(),
            message: rejection.to_string(),
        });
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn warn(&self, plugin: &str, rejection: &Rejection) {
        (**self).warn(plugin, rejection);
    }

    fn accepted(&self, plugin: &str) {
        (**self).accepted(plugin);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn warn(&self, plugin: &str, rejection: &Rejection) {
        (**self).warn(plugin, rejection);
    }

    fn accepted(&self, plugin: &str) {
        (**self).accepted(plugin);
    }
}

/// Fan out to two sinks.
impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for (A, B) {
    fn warn(&self, plugin: &str, rejection: &Rejection) {
        self.0.warn(plugin, rejection);
        self.1.warn(plugin, rejection);
    }

    fn accepted(&self, plugin: &str) {
        self.0.accepted(plugin);
        self.1.accepted(plugin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_in_order_and_drains() {
        let sink = MemorySink::new();
        sink.warn("ebm", &Rejection::MissingFit);
        sink.warn("ebm", &Rejection::MissingPredict);

        assert_eq!(
            sink.messages(),
            vec![
                "Explainer not valid due to missing fit function.".to_string(),
                "Explainer not valid due to missing predict function.".to_string(),
            ]
        );
        assert_eq!(sink.entries()[0].plugin, "ebm");

        let drained = sink.take();
        assert_eq!(drained.len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn pair_sink_forwards_to_both() {
        let left = Arc::new(MemorySink::new());
        let right = Arc::new(MemorySink::new());
        let pair = (left.clone(), right.clone());
        pair.warn("viz", &Rejection::NotAProvider);
        assert_eq!(left.len(), 1);
        assert_eq!(right.messages(), left.messages());
    }
}
