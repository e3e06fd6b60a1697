#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod facility;
pub mod global;
pub mod manager;
pub mod port;
pub mod registry;
pub mod setup;
pub mod telemetry;

pub use domain::{LogLevel, LogMessage};
pub use error::{LogError, SinkError};
pub use facility::{DEFAULT_TIMESTAMP_FORMAT, Delivery, Facility, render_line, time_of_log};
pub use manager::{DispatchReport, FacilityId, LogManager};
pub use port::LogSink;
pub use registry::LevelRegistry;
