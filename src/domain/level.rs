use std::fmt;

/// A severity category. Lower priority values are more severe: the first
/// level registered with a manager gets priority 0.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LogLevel {
    priority: u32,
    name: String,
    abbreviation: String,
}

impl LogLevel {
    pub fn new(priority: u32, name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            priority,
            name: name.into(),
            abbreviation: abbreviation.into(),
        }
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// True when `self` passes a filter set to `threshold`.
    pub fn is_at_least_as_severe_as(&self, threshold: &LogLevel) -> bool {
        self.priority <= threshold.priority
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
