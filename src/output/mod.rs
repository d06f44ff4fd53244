//! Output module for scrape results and failures
//!
//! This module handles:
//! - Exporting product records to a dated CSV file
//! - Appending pipeline failures to the error log

mod csv_export;
mod error_log;

pub use csv_export::{csv_file_name, export_csv, export_csv_today, CSV_COLUMNS};
pub use error_log::{
    append_log_line, console_message, format_log_line, log_error, LOG_TIMESTAMP_FORMAT,
};
