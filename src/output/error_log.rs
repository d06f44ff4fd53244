//! Error log
//!
//! Every pipeline failure ends here: one line goes to the append-only log
//! file and one short message goes to stdout. Logging never fails the caller.

use crate::{Result, ShopSieveError};
use chrono::{DateTime, Local};
use std::error::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Local time format used in the log, e.g. `Mon Jan 01 2024 09:30:00 GMT+0100`
pub const LOG_TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Formats `[<timestamp>] <message>\n`
pub fn format_log_line(message: &str, at: DateTime<Local>) -> String {
    format!("[{}] {}\n", at.format(LOG_TIMESTAMP_FORMAT), message)
}

/// Appends a line to the log file, creating it if needed
pub fn append_log_line(log_path: &Path, line: &str) -> Result<()> {
    let log_error = |source| ShopSieveError::Log {
        path: log_path.display().to_string(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(log_error)?;

    file.write_all(line.as_bytes()).map_err(log_error)
}

/// Message printed for a failure: the friendly context of a
/// [`ShopSieveError`], otherwise the error's own message
pub fn console_message(err: &(dyn Error + 'static)) -> String {
    match err.downcast_ref::<ShopSieveError>() {
        Some(err) => err.friendly_message(),
        None => err.to_string(),
    }
}

/// Records a pipeline failure
///
/// The raw message goes to the log file; the friendly context (or the raw
/// message when there is none) is printed to stdout. If the log file cannot
/// be written, that failure is printed to stderr and otherwise ignored.
pub fn log_error(err: &(dyn Error + 'static), log_path: &Path) {
    tracing::debug!("Pipeline failed: {}", err);

    println!("{}", console_message(err));

    let line = format_log_line(&err.to_string(), Local::now());
    if let Err(log_err) = append_log_line(log_path, &line) {
        tracing::debug!("Could not record error: {}", log_err);
        eprintln!("{}", log_err);
    }
}
