use std::fmt;

use tracing::{debug, warn};

use crate::domain::{LogLevel, LogMessage};
use crate::error::LogError;
use crate::facility::{Delivery, Facility};
use crate::port::LogSink;
use crate::registry::LevelRegistry;

/// Handle returned when a facility is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacilityId(usize);

impl FacilityId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-facility outcome of a broadcast, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub deliveries: Vec<(FacilityId, Delivery)>,
}

impl DispatchReport {
    pub fn rendered(&self) -> usize {
        self.count(Delivery::Rendered)
    }

    pub fn filtered(&self) -> usize {
        self.count(Delivery::Filtered)
    }

    pub fn failed(&self) -> usize {
        self.count(Delivery::Failed)
    }

    pub fn delivery_for(&self, id: FacilityId) -> Option<Delivery> {
        self.deliveries
            .iter()
            .find(|(fid, _)| *fid == id)
            .map(|(_, d)| *d)
    }

    fn count(&self, kind: Delivery) -> usize {
        self.deliveries.iter().filter(|(_, d)| *d == kind).count()
    }
}

/// Owns the severity levels and the registered facilities, and routes
/// messages to them.
///
/// Facilities live in a slot table. Slots are never reused, so iteration
/// order is registration order and a stale `FacilityId` can only ever miss.
#[derive(Debug, Default)]
pub struct LogManager {
    levels: LevelRegistry,
    facilities: Vec<Option<Facility>>,
}

impl LogManager {
    pub fn new() -> Self {
        Self::default()
    }

    // Levels

    /// Adds a level with the next sequential priority (first added is most
    /// severe). Pass `""` when no abbreviation is wanted.
    pub fn add_log_level(
        &mut self,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
    ) -> LogLevel {
        self.levels.add(name, abbreviation)
    }

    pub fn add_log_levels<N, A>(&mut self, levels: impl IntoIterator<Item = (N, A)>) -> Vec<LogLevel>
    where
        N: Into<String>,
        A: Into<String>,
    {
        levels
            .into_iter()
            .map(|(name, abbr)| self.add_log_level(name, abbr))
            .collect()
    }

    /// Replaces every level at once. Registered facilities keep their
    /// threshold priority, clamped to the new least severe level.
    pub fn set_log_level_list(&mut self, levels: Vec<LogLevel>) -> Result<(), LogError> {
        let registry = LevelRegistry::from_levels(levels)?;
        for facility in self.facilities.iter_mut().flatten() {
            let priority = facility.logging_level().priority();
            facility.set_logging_to_level(&registry, priority)?;
        }
        self.levels = registry;
        Ok(())
    }

    pub fn get_log_level_by_priority(&self, priority: u32) -> Result<&LogLevel, LogError> {
        self.levels.get(priority)
    }

    pub fn get_least_priority_level(&self) -> u32 {
        self.levels.least_priority()
    }

    pub fn levels(&self) -> &LevelRegistry {
        &self.levels
    }

    // Messages

    /// Offers `message` to every facility in registration order. Each
    /// facility applies its own threshold; a failing sink does not stop the
    /// remaining deliveries.
    pub fn add_log_message(&mut self, message: &LogMessage) -> DispatchReport {
        let mut report = DispatchReport::default();
        for (index, slot) in self.facilities.iter_mut().enumerate() {
            let Some(facility) = slot else { continue };
            let delivery = facility.add_message(message);
            report.deliveries.push((FacilityId(index), delivery));
        }
        if report.failed() > 0 {
            warn!(
                failed = report.failed(),
                rendered = report.rendered(),
                "Broadcast completed with sink failures"
            );
        }
        report
    }

    pub fn add_log_message_text(&mut self, text: impl Into<String>, level: &LogLevel) -> DispatchReport {
        self.add_log_message(&LogMessage::new(text, level.clone()))
    }

    /// Broadcasts `text` at the registered level with `priority`.
    pub fn log(&mut self, text: impl Into<String>, priority: u32) -> Result<DispatchReport, LogError> {
        let level = self.levels.get(priority)?.clone();
        Ok(self.add_log_message(&LogMessage::new(text, level)))
    }

    pub fn add_log_message_to(
        &mut self,
        message: &LogMessage,
        id: FacilityId,
    ) -> Result<Delivery, LogError> {
        Ok(self.facility_mut(id)?.add_message(message))
    }

    pub fn add_log_message_text_to(
        &mut self,
        text: impl Into<String>,
        level: &LogLevel,
        id: FacilityId,
    ) -> Result<Delivery, LogError> {
        self.add_log_message_to(&LogMessage::new(text, level.clone()), id)
    }

    // Facilities

    pub fn register_log_facility_provider(&mut self, facility: Facility) -> Result<FacilityId, LogError> {
        let threshold = facility.logging_level();
        if !self.levels.contains(threshold) {
            return Err(LogError::InvalidLevel {
                priority: threshold.priority(),
                name: threshold.name().to_string(),
            });
        }

        let id = FacilityId(self.facilities.len());
        debug!(
            facility = facility.name(),
            sink = facility.sink_kind(),
            threshold = %threshold,
            id = %id,
            "Registered log facility"
        );
        self.facilities.push(Some(facility));
        Ok(id)
    }

    /// Builds a facility whose threshold is resolved by priority (clamped to
    /// the least severe level) and registers it.
    pub fn create_facility(
        &mut self,
        name: impl Into<String>,
        threshold_priority: u32,
        sink: Box<dyn LogSink>,
    ) -> Result<FacilityId, LogError> {
        let threshold = self.levels.resolve(threshold_priority)?.clone();
        self.register_log_facility_provider(Facility::new(name, threshold, sink))
    }

    /// Removes the facility and hands it back to the caller.
    pub fn unregister_log_facility_provider(&mut self, id: FacilityId) -> Result<Facility, LogError> {
        let facility = self
            .facilities
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(LogError::UnknownFacility(id))?;
        debug!(facility = facility.name(), id = %id, "Unregistered log facility");
        Ok(facility)
    }

    pub fn facility(&self, id: FacilityId) -> Result<&Facility, LogError> {
        self.facilities
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(LogError::UnknownFacility(id))
    }

    pub fn facility_mut(&mut self, id: FacilityId) -> Result<&mut Facility, LogError> {
        self.facilities
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(LogError::UnknownFacility(id))
    }

    pub fn facility_count(&self) -> usize {
        self.facilities.iter().flatten().count()
    }

    pub fn facility_ids(&self) -> Vec<FacilityId> {
        self.facilities
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| FacilityId(index))
            .collect()
    }

    pub fn set_logging_to_level(&mut self, id: FacilityId, priority: u32) -> Result<&LogLevel, LogError> {
        let facility = self
            .facilities
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(LogError::UnknownFacility(id))?;
        facility.set_logging_to_level(&self.levels, priority)
    }

    pub fn set_logging_to_registered_level(
        &mut self,
        id: FacilityId,
        level: &LogLevel,
    ) -> Result<(), LogError> {
        let facility = self
            .facilities
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(LogError::UnknownFacility(id))?;
        facility.set_logging_to_registered_level(&self.levels, level)
    }

    pub fn get_logging_level(&self, id: FacilityId) -> Result<&LogLevel, LogError> {
        Ok(self.facility(id)?.logging_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::memory::MemorySink;
    use crate::error::SinkError;
    use tracing_test::traced_test;

    struct FailingSink;

    impl LogSink for FailingSink {
        fn print_message(&mut self, _message: &LogMessage) -> Result<(), SinkError> {
            Err(SinkError::Io {
                sink: "failing".into(),
                source: std::io::Error::other("disk full"),
            })
        }

        fn kind(&self) -> &'static str {
            "failing"
        }
    }

    fn manager() -> LogManager {
        let mut manager = LogManager::new();
        manager.add_log_levels([("ERROR", "E"), ("WARN", "W"), ("INFO", "I")]);
        manager
    }

    #[test]
    fn test_register_with_unregistered_threshold_fails() {
        let mut manager = manager();
        let (sink, _) = MemorySink::new("%H");
        let facility = Facility::new("mem", LogLevel::new(9, "TRACE", "T"), Box::new(sink));

        let err = manager.register_log_facility_provider(facility).unwrap_err();
        assert!(matches!(err, LogError::InvalidLevel { priority: 9, .. }));
        assert_eq!(manager.facility_count(), 0);
    }

    #[test]
    fn test_create_facility_without_levels_fails() {
        let mut manager = LogManager::new();
        let (sink, _) = MemorySink::new("%H");
        let result = manager.create_facility("mem", 0, Box::new(sink));
        assert!(matches!(result, Err(LogError::NotFound { priority: 0 })));
    }

    #[test]
    fn test_set_log_level_list_reclamps_facilities() {
        let mut manager = manager();
        let (sink, _) = MemorySink::new("%H");
        let id = manager.create_facility("mem", 2, Box::new(sink)).unwrap();

        manager
            .set_log_level_list(vec![
                LogLevel::new(0, "FATAL", "F"),
                LogLevel::new(1, "NOTICE", "N"),
            ])
            .unwrap();

        assert_eq!(manager.get_least_priority_level(), 1);
        assert_eq!(manager.get_logging_level(id).unwrap().name(), "NOTICE");
    }

    #[test]
    fn test_set_log_level_list_rejects_invalid_list() {
        let mut manager = manager();
        let result = manager.set_log_level_list(vec![LogLevel::new(3, "X", "x")]);
        assert!(matches!(result, Err(LogError::InvalidLevelList(_))));
        assert_eq!(manager.levels().len(), 3);
    }

    #[test]
    fn test_facility_ids_skip_unregistered() {
        let mut manager = manager();
        let (a, _) = MemorySink::new("%H");
        let (b, _) = MemorySink::new("%H");
        let first = manager.create_facility("a", 0, Box::new(a)).unwrap();
        let second = manager.create_facility("b", 0, Box::new(b)).unwrap();

        manager.unregister_log_facility_provider(first).unwrap();
        assert_eq!(manager.facility_ids(), vec![second]);
        assert_eq!(first.to_string(), "#0");
    }

    #[traced_test]
    #[test]
    fn test_sink_failure_is_logged() {
        let mut manager = manager();
        manager
            .create_facility("broken", 2, Box::new(FailingSink))
            .unwrap();

        let report = manager.log("boom", 0).unwrap();

        assert_eq!(report.failed(), 1);
        assert!(logs_contain("Failed to render log message"));
        assert!(logs_contain("disk full"));
    }
}
