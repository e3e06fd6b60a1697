use thiserror::Error;

use crate::manager::FacilityId;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Log manager is not initialized")]
    NotInitialized,

    #[error("Log manager is already initialized")]
    AlreadyInitialized,

    #[error("No log level registered with priority {priority}")]
    NotFound { priority: u32 },

    #[error("Log level {name} (priority {priority}) is not registered")]
    InvalidLevel { priority: u32, name: String },

    #[error("Invalid log level list: {0}")]
    InvalidLevelList(String),

    #[error("Unknown log facility {0}")]
    UnknownFacility(FacilityId),

    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure raised by a sink while rendering a single message.
///
/// Never crosses the facility boundary: `Facility::add_message` turns it into
/// `Delivery::Failed` after logging it.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to write to {sink}: {source}")]
    Io {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Sink is closed")]
    Closed,
}
