//! Shop-Sieve: a single-site product scraper
//!
//! This crate crawls one e-commerce site, discovers product-detail pages,
//! extracts title, price and image from each, and exports the results to a
//! dated CSV file.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Main error type for Shop-Sieve operations
#[derive(Debug, Error)]
pub enum ShopSieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize CSV to {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("Failed to append to log file {path}: {source}")]
    Log {
        path: String,
        source: std::io::Error,
    },

    /// Any of the above, with a human-readable message for the console
    #[error("{source}")]
    WithContext {
        context: String,
        source: Box<ShopSieveError>,
    },
}

impl ShopSieveError {
    /// Message shown to the user: the friendly context when one was
    /// attached, otherwise the raw error message
    pub fn friendly_message(&self) -> String {
        match self {
            Self::WithContext { context, .. } => context.clone(),
            other => other.to_string(),
        }
    }

    /// Returns the innermost error, skipping context wrappers
    pub fn root(&self) -> &ShopSieveError {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns true for page-unreachable and non-2xx failures
    pub fn is_fetch(&self) -> bool {
        matches!(self.root(), Self::Http { .. } | Self::Status { .. })
    }

    /// Returns true for CSV serialization and filesystem failures
    pub fn is_write(&self) -> bool {
        matches!(self.root(), Self::Write { .. } | Self::Csv { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("URL leaves the site: {0}")]
    OffSite(String),
}

/// Attaches a friendly message to a failing result
pub trait Context<T> {
    fn with_context<F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: Into<ShopSieveError>,
{
    fn with_context<F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ShopSieveError::WithContext {
            context: context(),
            source: Box::new(e.into()),
        })
    }
}

/// Result type alias for Shop-Sieve operations
pub type Result<T> = std::result::Result<T, ShopSieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::ProductRecord;
pub use extract::{ExtractionTemplate, FieldRule};
pub use pipeline::{run_pipeline, Pipeline};
