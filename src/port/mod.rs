use crate::domain::LogMessage;
use crate::error::SinkError;

/// Render backend for a facility (console, file, memory, ...).
///
/// Implementations only render. Severity filtering happens in `Facility`
/// before a sink ever sees the message.
pub trait LogSink: Send {
    fn print_message(&mut self, message: &LogMessage) -> Result<(), SinkError>;

    /// Short label used in diagnostics.
    fn kind(&self) -> &'static str;
}
