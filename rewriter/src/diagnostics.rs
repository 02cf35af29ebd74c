//! Diagnostic sinks for rewrite passes.
//!
//! Diagnostics never change the rewritten text. By default they are routed
//! to `tracing`; tests and tools that want to inspect them can collect them
//! with [`CollectingSink`].

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// Receiver for informational notices and warnings raised during a pass.
pub trait DiagnosticSink: Sync {
    fn notice(&self, message: &str);
    fn warning(&self, message: &str);
}

/// Sink that forwards notices to `info!` and warnings to `warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn notice(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

pub(crate) static TRACING_SINK: TracingSink = TracingSink;

/// Severity of a collected diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    Notice,
    Warning,
}

/// One collected diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// Sink that records every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the recorded warning messages.
    pub fn warnings(&self) -> Vec<String> {
        self.messages(DiagnosticLevel::Warning)
    }

    /// Returns the recorded notice messages.
    pub fn notices(&self) -> Vec<String> {
        self.messages(DiagnosticLevel::Notice)
    }

    fn messages(&self, level: DiagnosticLevel) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|d| d.level == level)
            .map(|d| d.message.clone())
            .collect()
    }

    fn push(&self, level: DiagnosticLevel, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                level,
                message: message.to_string(),
            });
    }
}

impl DiagnosticSink for CollectingSink {
    fn notice(&self, message: &str) {
        self.push(DiagnosticLevel::Notice, message);
    }

    fn warning(&self, message: &str) {
        self.push(DiagnosticLevel::Warning, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_separates_levels() {
        let sink = CollectingSink::new();
        sink.notice("known tool");
        sink.warning("unknown tool");
        sink.notice("another");

        assert_eq!(sink.notices(), vec!["known tool", "another"]);
        assert_eq!(sink.warnings(), vec!["unknown tool"]);
        assert_eq!(sink.diagnostics().len(), 3);
    }
}
