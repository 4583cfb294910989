use std::fs::OpenOptions;
use std::io::Write;

use chrono::Local;

use crate::core::message::Message;

/// Optional append-only transcript logging.
///
/// When a log file is configured, every exchanged message is appended as a
/// `Label: text` line. Logging failures are reported to stderr once per
/// write and never interrupt the chat.
pub struct LoggingState {
    file_path: Option<String>,
}

impl LoggingState {
    /// Create the logging state, verifying the file is writable when one
    /// was configured. A session header line with a local timestamp marks
    /// where this run's entries begin.
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let logging = LoggingState {
            file_path: log_file,
        };

        if let Some(path) = &logging.file_path {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(
                file,
                "--- session started {} ---",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            )?;
            file.flush()?;
        }

        Ok(logging)
    }

    pub fn is_active(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn log_message(&self, message: &Message) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = &self.file_path else {
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        writeln!(file, "{}: {}", message.sender.display_label(), message.text)?;
        file.flush()?;
        Ok(())
    }
}
