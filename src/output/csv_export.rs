//! Dated CSV export
//!
//! Records are written to `<data-dir>/<YYYY-MM-DD>.csv` with a header row.
//! A second run on the same day overwrites the file.

use crate::crawler::ProductRecord;
use crate::{Result, ShopSieveError};
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};

/// Column order of the exported file
pub const CSV_COLUMNS: [&str; 5] = ["Title", "Price", "ImageURL", "URL", "Time"];

/// File name for a given date, e.g. `2024-01-01.csv`
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("{}.csv", date.format("%Y-%m-%d"))
}

/// Exports records to the file for today's UTC date
pub fn export_csv_today(records: &[ProductRecord], data_dir: &Path) -> Result<PathBuf> {
    export_csv(records, data_dir, Utc::now().date_naive())
}

/// Exports records to `<data_dir>/<date>.csv`
///
/// # Arguments
///
/// * `records` - Records to write, in order
/// * `data_dir` - Output directory; created if missing
/// * `date` - Date naming the file
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(ShopSieveError)` - Directory creation, serialization, or write failed
pub fn export_csv(records: &[ProductRecord], data_dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(data_dir).map_err(|source| ShopSieveError::Write {
        path: data_dir.display().to_string(),
        source,
    })?;

    let path = data_dir.join(csv_file_name(date));
    let csv_error = |source: csv::Error| ShopSieveError::Csv {
        path: path.display().to_string(),
        source,
    };

    // The header is written by hand so an empty export still has one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .map_err(csv_error)?;

    writer.write_record(CSV_COLUMNS).map_err(csv_error)?;
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }

    writer.flush().map_err(|source| ShopSieveError::Write {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(path)
}
