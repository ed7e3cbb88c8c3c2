//! Error reporting hooks
//!
//! The interpreter never displays anything itself. Rejected commands are
//! forwarded to an [`ErrorSink`] so the host can show them however it likes.

use parking_lot::Mutex;

use crate::error::ErrorKind;

/// Receiver for rejected-command reports
pub trait ErrorSink: Send {
    fn report(&mut self, kind: ErrorKind, message: &str);
}

/// Sink that writes reports to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&mut self, kind: ErrorKind, message: &str) {
        log::error!("{} error: {}", kind, message);
    }
}

/// Sink that keeps every report, for hosts that poll and for tests
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<(ErrorKind, String)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything reported so far
    pub fn take(&self) -> Vec<(ErrorKind, String)> {
        std::mem::take(&mut *self.reports.lock())
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

impl ErrorSink for CollectingSink {
    fn report(&mut self, kind: ErrorKind, message: &str) {
        self.reports.get_mut().push((kind, message.to_string()));
    }
}

/// Shared handles report into the same collection
impl ErrorSink for std::sync::Arc<CollectingSink> {
    fn report(&mut self, kind: ErrorKind, message: &str) {
        self.reports.lock().push((kind, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_collecting_sink_shared() {
        let sink = Arc::new(CollectingSink::new());
        let mut handle = Arc::clone(&sink);
        handle.report(ErrorKind::State, "nothing selected");
        assert_eq!(sink.len(), 1);

        let reports = sink.take();
        assert_eq!(reports[0].0, ErrorKind::State);
        assert!(sink.is_empty());
    }
}
