use tracing::info;

use crate::adapter::{ConsoleSink, FileSink};
use crate::config::Settings;
use crate::error::LogError;
use crate::manager::{FacilityId, LogManager};

/// Conventional levels, most severe first.
pub const STANDARD_LEVELS: [(&str, &str); 4] =
    [("ERROR", "E"), ("WARN", "W"), ("INFO", "I"), ("DEBUG", "D")];

pub fn standard_levels(manager: &mut LogManager) {
    manager.add_log_levels(STANDARD_LEVELS);
}

/// Manager with the standard levels plus whatever facilities `settings`
/// enables. Facility handles are returned in registration order.
pub fn build_manager(settings: &Settings) -> Result<(LogManager, Vec<FacilityId>), LogError> {
    settings.validate()?;

    let mut manager = LogManager::new();
    standard_levels(&mut manager);
    let least = manager.get_least_priority_level();

    let mut ids = Vec::new();
    if settings.console_enabled {
        let sink = ConsoleSink::with_format(&settings.timestamp_format);
        let id = manager.create_facility(
            "console",
            settings.console_level.unwrap_or(least),
            Box::new(sink),
        )?;
        ids.push(id);
    }

    if let Some(path) = &settings.file_path {
        let sink = FileSink::with_format(path, &settings.timestamp_format)?;
        let id = manager.create_facility(
            "file",
            settings.file_level.unwrap_or(least),
            Box::new(sink),
        )?;
        ids.push(id);
    }

    info!(facilities = ids.len(), "Log manager ready");
    Ok((manager, ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_manager_registers_console_by_default() {
        let (manager, ids) = build_manager(&Settings::default()).unwrap();

        assert_eq!(manager.levels().len(), 4);
        assert_eq!(ids.len(), 1);
        let console = manager.facility(ids[0]).unwrap();
        assert_eq!(console.name(), "console");
        assert_eq!(console.logging_level().name(), "DEBUG");
    }

    #[test]
    fn test_build_manager_with_file_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let settings = Settings {
            timestamp_format: "TS".into(),
            console_enabled: false,
            file_path: Some(path.clone()),
            file_level: Some(1),
            ..Settings::default()
        };

        let (mut manager, ids) = build_manager(&settings).unwrap();
        assert_eq!(ids.len(), 1);

        manager.log("dropped", 2).unwrap();
        manager.log("kept", 1).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "TS (W) WARN: kept\n");
    }

    #[test]
    fn test_build_manager_clamps_large_threshold() {
        let settings = Settings {
            console_level: Some(99),
            ..Settings::default()
        };
        let (manager, ids) = build_manager(&settings).unwrap();
        assert_eq!(manager.get_logging_level(ids[0]).unwrap().priority(), 3);
    }
}
