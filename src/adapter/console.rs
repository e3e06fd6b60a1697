use std::io::{self, Write};

use crate::domain::LogMessage;
use crate::error::SinkError;
use crate::facility::{DEFAULT_TIMESTAMP_FORMAT, render_line, time_of_log};
use crate::port::LogSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Writes one line per accepted message to the process console.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    target: ConsoleTarget,
    timestamp_format: String,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_format(DEFAULT_TIMESTAMP_FORMAT)
    }

    pub fn with_format(timestamp_format: impl Into<String>) -> Self {
        Self {
            target: ConsoleTarget::Stdout,
            timestamp_format: timestamp_format.into(),
        }
    }

    pub fn to_stderr(mut self) -> Self {
        self.target = ConsoleTarget::Stderr;
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    fn write_to(&self, out: &mut impl Write, message: &LogMessage) -> io::Result<()> {
        let line = render_line(&time_of_log(&self.timestamp_format), message);
        writeln!(out, "{line}")
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn print_message(&mut self, message: &LogMessage) -> Result<(), SinkError> {
        let result = match self.target {
            ConsoleTarget::Stdout => self.write_to(&mut io::stdout().lock(), message),
            ConsoleTarget::Stderr => self.write_to(&mut io::stderr().lock(), message),
        };
        result.map_err(|source| SinkError::Io {
            sink: format!("{:?}", self.target).to_lowercase(),
            source,
        })
    }

    fn kind(&self) -> &'static str {
        "console"
    }
}
