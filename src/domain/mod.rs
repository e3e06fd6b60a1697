mod level;
mod message;

pub use level::LogLevel;
pub use message::LogMessage;
