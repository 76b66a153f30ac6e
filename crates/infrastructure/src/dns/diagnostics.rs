use nsquery_application::ports::{Diagnostic, DiagnosticSink};
use std::sync::mpsc;
use tracing::warn;

/// Writes diagnostics to the log at warning level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic) {
        warn!(diagnostic = %diagnostic, "Query diagnostic");
    }
}

/// Forwards diagnostics to a channel so the caller can inspect them.
#[derive(Clone)]
pub struct DiagnosticEmitter {
    sender: Option<mpsc::Sender<Diagnostic>>,
}

impl DiagnosticEmitter {
    pub fn new_disabled() -> Self {
        Self { sender: None }
    }

    pub fn new_enabled() -> (Self, mpsc::Receiver<Diagnostic>) {
        let (tx, rx) = mpsc::channel();
        let emitter = Self { sender: Some(tx) };
        (emitter, rx)
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }
}

impl DiagnosticSink for DiagnosticEmitter {
    fn emit(&self, diagnostic: Diagnostic) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(diagnostic);
        }
    }
}

impl Default for DiagnosticEmitter {
    fn default() -> Self {
        Self::new_disabled()
    }
}

impl std::fmt::Debug for DiagnosticEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticEmitter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
