use super::LogLevel;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogMessage {
    text: String,
    level: LogLevel,
}

impl LogMessage {
    pub fn new(text: impl Into<String>, level: LogLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn message(&self) -> &str {
        &self.text
    }

    pub fn level(&self) -> &LogLevel {
        &self.level
    }

    pub fn message_priority(&self) -> u32 {
        self.level.priority()
    }
}
