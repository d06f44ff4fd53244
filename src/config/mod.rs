//! Configuration module for Shop-Sieve
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file scrapes the built-in site.
//!
//! # Example
//!
//! ```no_run
//! use shop_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shop-sieve.toml")).unwrap();
//! println!("Crawling {} levels deep", config.crawler.levels);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SiteConfig, TemplateConfig, UserAgentConfig,
    DEFAULT_BASE_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
