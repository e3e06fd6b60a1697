//! In-memory sink
//!
//! Captures rendered lines so tests and embedders can inspect exactly what a
//! facility accepted.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::LogMessage;
use crate::error::SinkError;
use crate::facility::{render_line, time_of_log};
use crate::port::LogSink;

#[derive(Default)]
struct Captured {
    lines: Vec<String>,
    messages: Vec<LogMessage>,
}

pub struct MemorySink {
    timestamp_format: String,
    captured: Arc<Mutex<Captured>>,
}

/// Read side of a `MemorySink`, still usable after the sink moved into a
/// manager.
#[derive(Clone)]
pub struct MemorySinkHandle {
    captured: Arc<Mutex<Captured>>,
}

impl MemorySink {
    pub fn new(timestamp_format: impl Into<String>) -> (Self, MemorySinkHandle) {
        let captured = Arc::new(Mutex::new(Captured::default()));
        let sink = Self {
            timestamp_format: timestamp_format.into(),
            captured: captured.clone(),
        };
        (sink, MemorySinkHandle { captured })
    }
}

impl LogSink for MemorySink {
    fn print_message(&mut self, message: &LogMessage) -> Result<(), SinkError> {
        let line = render_line(&time_of_log(&self.timestamp_format), message);
        let mut guard = self.captured.lock();
        guard.lines.push(line);
        guard.messages.push(message.clone());
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

impl MemorySinkHandle {
    pub fn lines(&self) -> Vec<String> {
        self.captured.lock().lines.clone()
    }

    /// Message texts in render order.
    pub fn messages(&self) -> Vec<String> {
        self.captured
            .lock()
            .messages
            .iter()
            .map(|m| m.message().to_string())
            .collect()
    }

    pub fn records(&self) -> Vec<LogMessage> {
        self.captured.lock().messages.clone()
    }

    pub fn len(&self) -> usize {
        self.captured.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut guard = self.captured.lock();
        guard.lines.clear();
        guard.messages.clear();
    }
}
