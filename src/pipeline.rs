//! Scrape pipeline - wires the stages together
//!
//! Link discovery → product filter → detail aggregation → CSV export.
//! The first failing stage ends the run; the failure is written to the
//! error log by [`run_pipeline`].

use crate::config::{validate, Config};
use crate::crawler::{build_http_client, crawl_links, fetch_all_details, product_template};
use crate::extract::ExtractionTemplate;
use crate::output::{export_csv, export_csv_today, log_error};
use crate::url::{filter_products, parse_base_url};
use crate::{ConfigError, Context, ProductRecord, Result, ShopSieveError};
use chrono::NaiveDate;
use reqwest::Client;
use scraper::Selector;
use std::path::{Path, PathBuf};
use url::Url;

/// One configured scrape of one site
pub struct Pipeline {
    config: Config,
    client: Client,
    base: Url,
    link_selector: Selector,
    template: ExtractionTemplate,
}

impl Pipeline {
    /// Builds the pipeline: validates the configuration, parses the base
    /// URL, compiles selectors and creates the HTTP client
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let base = parse_base_url(&config.site.base_url)?;

        let link_selector = Selector::parse(&config.crawler.link_selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("'{}': {:?}", config.crawler.link_selector, e))
        })?;

        let template = product_template(&config.template, &base)?;

        let client = build_http_client(&config.user_agent).map_err(|source| ShopSieveError::Http {
            url: base.to_string(),
            source,
        })?;

        Ok(Self {
            config,
            client,
            base,
            link_selector,
            template,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls the configured number of levels and returns absolute product URLs
    pub async fn discover_products(&self) -> Result<Vec<String>> {
        let links = crawl_links(
            &self.client,
            &self.base,
            &self.config.site.seeds,
            self.config.crawler.levels,
            &self.link_selector,
        )
        .await
        .with_context(|| format!("Could not crawl {} for product links", self.base))?;

        let products = filter_products(&self.base, &links, &self.config.site.product_marker);
        tracing::info!(
            "{} of {} discovered links are product pages",
            products.len(),
            links.len()
        );

        Ok(products)
    }

    /// Fetches a record for every product URL
    pub async fn scrape_products(&self, urls: &[String]) -> Result<Vec<ProductRecord>> {
        fetch_all_details(&self.client, &self.template, urls)
            .await
            .with_context(|| "Could not fetch product details".to_string())
    }

    /// Discovers product pages and fetches a record for each
    pub async fn scrape(&self) -> Result<Vec<ProductRecord>> {
        let urls = self.discover_products().await?;
        self.scrape_products(&urls).await
    }

    fn data_dir(&self) -> &Path {
        Path::new(&self.config.output.data_dir)
    }

    /// Runs every stage and writes the CSV named after `date`
    pub async fn run_for_date(&self, date: NaiveDate) -> Result<PathBuf> {
        let records = self.scrape().await?;
        export_csv(&records, self.data_dir(), date).with_context(|| self.save_failed())
    }

    /// Runs every stage and writes today's CSV
    pub async fn run(&self) -> Result<PathBuf> {
        let records = self.scrape().await?;
        export_csv_today(&records, self.data_dir()).with_context(|| self.save_failed())
    }

    fn save_failed(&self) -> String {
        format!("Could not save results to {}", self.data_dir().display())
    }
}

/// Runs a complete scrape, recording any failure in the error log
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the CSV file written
/// * `Err(ShopSieveError)` - The failure, already logged
pub async fn run_pipeline(config: Config) -> Result<PathBuf> {
    let log_path = PathBuf::from(&config.output.error_log);

    let result = match Pipeline::new(config) {
        Ok(pipeline) => pipeline.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        log_error(e, &log_path);
    }

    result
}
