//! Diagnostics sinks
//!
//! The engine reports recoverable input problems (such as invalid UTF-8) to
//! a sink. Reporting is fire-and-forget: a sink must not block or fail.

use parking_lot::Mutex;

/// Receiver of human-readable warnings
pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Collects warnings in memory
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the messages collected so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Take and clear the collected messages
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn warn(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
