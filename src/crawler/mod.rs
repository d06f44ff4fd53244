//! Crawler module for web page fetching and processing
//!
//! This module contains the network-facing stages of the pipeline:
//! - HTTP fetching
//! - Multi-level link discovery
//! - Concurrent product detail aggregation

mod details;
mod fetcher;
mod links;

pub use details::{
    fetch_all_details, fetch_product, product_template, scrape_timestamp, ProductRecord,
    IMAGE_URL_FIELD, PRICE_FIELD, TIMESTAMP_FORMAT, TITLE_FIELD,
};
pub use fetcher::{build_http_client, fetch_page, user_agent};
pub use links::{crawl_level, crawl_links};
