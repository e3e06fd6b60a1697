use std::env;
use std::path::PathBuf;

use crate::error::LogError;
use crate::facility::{DEFAULT_TIMESTAMP_FORMAT, is_valid_timestamp_format};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// strftime format used for every rendered line
    pub timestamp_format: String,
    pub console_enabled: bool,
    /// Threshold priority; `None` means the least severe level.
    pub console_level: Option<u32>,
    pub file_path: Option<PathBuf>,
    pub file_level: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            console_enabled: true,
            console_level: None,
            file_path: None,
            file_level: None,
        }
    }
}

impl Settings {
    /// Builds settings from a variable lookup, e.g. `|k| std::env::var(k).ok()`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timestamp_format = lookup("LOG_FACILITY_TIMESTAMP_FORMAT")
            .unwrap_or(defaults.timestamp_format);
        let console_enabled = match lookup("LOG_FACILITY_CONSOLE") {
            Some(raw) => parse_bool("LOG_FACILITY_CONSOLE", &raw)?,
            None => defaults.console_enabled,
        };
        let console_level = parse_level(&lookup, "LOG_FACILITY_CONSOLE_LEVEL")?;
        let file_path = lookup("LOG_FACILITY_FILE_PATH").map(PathBuf::from);
        let file_level = parse_level(&lookup, "LOG_FACILITY_FILE_LEVEL")?;

        let settings = Settings {
            timestamp_format,
            console_enabled,
            console_level,
            file_path,
            file_level,
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), LogError> {
        validate_timestamp_format(&self.timestamp_format)?;
        if let Some(path) = &self.file_path {
            validate_file_path(path)?;
        }
        Ok(())
    }
}

pub fn get_configuration() -> Result<Settings, LogError> {
    Settings::from_lookup(|key| env::var(key).ok())
}

fn validate_timestamp_format(format: &str) -> Result<(), LogError> {
    if !is_valid_timestamp_format(format) {
        return Err(LogError::Config(format!(
            "Invalid timestamp format: {format}"
        )));
    }
    Ok(())
}

fn validate_file_path(path: &std::path::Path) -> Result<(), LogError> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(LogError::Config("File path cannot be empty".into()));
    }
    Ok(())
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, LogError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LogError::Config(format!(
            "{name} must be a boolean, got '{other}'"
        ))),
    }
}

fn parse_level<F>(lookup: &F, name: &str) -> Result<Option<u32>, LogError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim().parse::<u32>().map_err(|e| {
                LogError::Config(format!("{name} must be a level priority: {e}"))
            })
        })
        .transpose()
}
