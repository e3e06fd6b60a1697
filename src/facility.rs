use std::fmt::{self, Write as _};

use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use tracing::error;

use crate::domain::{LogLevel, LogMessage};
use crate::error::{LogError, SinkError};
use crate::port::LogSink;
use crate::registry::LevelRegistry;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y%m%d %H:%M:%S";

/// Outcome of offering one message to one facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Rendered,
    /// Less severe than the facility threshold; dropped silently.
    Filtered,
    /// The sink failed. Already logged, never propagated.
    Failed,
}

/// A named output sink with its own severity threshold.
pub struct Facility {
    name: String,
    current_level: LogLevel,
    sink: Box<dyn LogSink>,
}

impl Facility {
    pub fn new(name: impl Into<String>, threshold: LogLevel, sink: Box<dyn LogSink>) -> Self {
        Self {
            name: name.into(),
            current_level: threshold,
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logging_level(&self) -> &LogLevel {
        &self.current_level
    }

    pub fn sink_kind(&self) -> &'static str {
        self.sink.kind()
    }

    /// Renders `message` if it is at least as severe as the threshold.
    pub fn add_message(&mut self, message: &LogMessage) -> Delivery {
        if !message.level().is_at_least_as_severe_as(&self.current_level) {
            return Delivery::Filtered;
        }
        match self.print_message(message) {
            Ok(()) => Delivery::Rendered,
            Err(e) => {
                error!(
                    facility = %self.name,
                    sink = self.sink.kind(),
                    error = %e,
                    "Failed to render log message"
                );
                Delivery::Failed
            }
        }
    }

    /// Unfiltered render straight into the sink.
    pub fn print_message(&mut self, message: &LogMessage) -> Result<(), SinkError> {
        self.sink.print_message(message)
    }

    /// Sets the threshold by priority. A priority past the least severe
    /// registered level selects that level.
    pub fn set_logging_to_level(
        &mut self,
        levels: &LevelRegistry,
        priority: u32,
    ) -> Result<&LogLevel, LogError> {
        self.current_level = levels.resolve(priority)?.clone();
        Ok(&self.current_level)
    }

    pub fn set_logging_to_registered_level(
        &mut self,
        levels: &LevelRegistry,
        level: &LogLevel,
    ) -> Result<(), LogError> {
        if !levels.contains(level) {
            return Err(LogError::InvalidLevel {
                priority: level.priority(),
                name: level.name().to_string(),
            });
        }
        self.current_level = level.clone();
        Ok(())
    }
}

impl fmt::Debug for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facility")
            .field("name", &self.name)
            .field("current_level", &self.current_level)
            .field("sink", &self.sink.kind())
            .finish()
    }
}

/// Current local time rendered with a strftime-style `format`.
///
/// An unparseable format falls back to `DEFAULT_TIMESTAMP_FORMAT`.
pub fn time_of_log(format: &str) -> String {
    let now = Local::now();
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", now.format(DEFAULT_TIMESTAMP_FORMAT));
    }
    out
}

pub fn is_valid_timestamp_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// `<timestamp> (<abbr>) <name>: <text>`
pub fn render_line(timestamp: &str, message: &LogMessage) -> String {
    let level = message.level();
    format!(
        "{} ({}) {}: {}",
        timestamp,
        level.abbreviation(),
        level.name(),
        message.message()
    )
}
