// Append rendered log lines to a plain-text file. One line per accepted
// message, same layout as the console sink. The file is opened once in
// append mode and flushed after every line; no rotation.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::LogMessage;
use crate::error::{LogError, SinkError};
use crate::facility::{DEFAULT_TIMESTAMP_FORMAT, render_line, time_of_log};
use crate::port::LogSink;

pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    timestamp_format: String,
}

impl FileSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        Self::with_format(path, DEFAULT_TIMESTAMP_FORMAT)
    }

    pub fn with_format(
        path: impl AsRef<Path>,
        timestamp_format: impl Into<String>,
    ) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(path = %path.display(), "Opened log file");

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            timestamp_format: timestamp_format.into(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn print_message(&mut self, message: &LogMessage) -> Result<(), SinkError> {
        let line = render_line(&time_of_log(&self.timestamp_format), message);
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|source| SinkError::Io {
                sink: self.path.display().to_string(),
                source,
            })
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}
