use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::LogLevel;
use crate::error::LogError;

/// Ordered set of severity levels keyed by priority.
///
/// Priorities are always the contiguous range `0..len()`, assigned in
/// insertion order, so the most severe level is the first one added.
#[derive(Debug, Default, Clone)]
pub struct LevelRegistry {
    levels: BTreeMap<u32, LogLevel>,
}

impl LevelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a hand-made list. Priorities must be unique and
    /// cover `0..n` exactly, in any order.
    pub fn from_levels(levels: Vec<LogLevel>) -> Result<Self, LogError> {
        if levels.is_empty() {
            return Err(LogError::InvalidLevelList(
                "Level list cannot be empty".into(),
            ));
        }

        let count = levels.len();
        let mut map = BTreeMap::new();
        for level in levels {
            let priority = level.priority();
            if priority as usize >= count {
                return Err(LogError::InvalidLevelList(format!(
                    "Priority {priority} of {} is outside 0..{count}",
                    level.name()
                )));
            }
            if let Some(existing) = map.insert(priority, level) {
                return Err(LogError::InvalidLevelList(format!(
                    "Priority {priority} is used more than once (first by {})",
                    existing.name()
                )));
            }
        }

        Ok(Self { levels: map })
    }

    pub fn add(&mut self, name: impl Into<String>, abbreviation: impl Into<String>) -> LogLevel {
        let priority = self.levels.len() as u32;
        let level = LogLevel::new(priority, name, abbreviation);
        debug!(priority, name = level.name(), "Registered log level");
        self.levels.insert(priority, level.clone());
        level
    }

    pub fn get(&self, priority: u32) -> Result<&LogLevel, LogError> {
        self.levels
            .get(&priority)
            .ok_or(LogError::NotFound { priority })
    }

    /// Exact lookup, falling back to the least severe level when `priority`
    /// is past the end of the registry.
    pub fn resolve(&self, priority: u32) -> Result<&LogLevel, LogError> {
        if let Some(level) = self.levels.get(&priority) {
            return Ok(level);
        }
        match self.levels.last_key_value() {
            Some((&max, level)) if priority > max => {
                debug!(
                    requested = priority,
                    clamped_to = max,
                    "Clamped threshold to least severe level"
                );
                Ok(level)
            }
            _ => Err(LogError::NotFound { priority }),
        }
    }

    /// Priority of the least severe level, or 0 when nothing is registered.
    pub fn least_priority(&self) -> u32 {
        if self.levels.is_empty() {
            return 0;
        }
        self.levels.len() as u32 - 1
    }

    pub fn contains(&self, level: &LogLevel) -> bool {
        self.levels.get(&level.priority()) == Some(level)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogLevel> {
        self.levels.values()
    }
}
