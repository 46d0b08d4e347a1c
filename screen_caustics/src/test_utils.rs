//! Shared helpers for unit tests (test builds only)

use std::sync::{Arc, Mutex};
use crate::log::{Logger, LogEntry, LogSeverity};

/// Logger that captures entries for verification
///
/// Clones share the same storage, so one clone can be installed with
/// `log::set_logger` while the test keeps the other.
#[derive(Clone)]
pub struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Entries logged by a given source, in order
    pub fn entries_from(&self, source: &str) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.source == source)
            .cloned()
            .collect()
    }

    /// Whether an entry with this source and severity contains `needle`
    pub fn contains(&self, source: &str, severity: LogSeverity, needle: &str) -> bool {
        self.entries_from(source)
            .iter()
            .any(|e| e.severity == severity && e.message.contains(needle))
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}
