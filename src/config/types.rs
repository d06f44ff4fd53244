use crate::extract::FieldRule;
use serde::Deserialize;

/// Site scraped when no configuration overrides it
pub const DEFAULT_BASE_URL: &str = "http://www.shirts4mike.com/";

/// Main configuration structure for Shop-Sieve
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub template: TemplateConfig,
}

/// The site being scraped
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL every relative path is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Paths the first crawl level starts from ("" is the homepage)
    pub seeds: Vec<String>,

    /// Substring identifying product-detail URLs
    #[serde(rename = "product-marker")]
    pub product_marker: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            seeds: vec![String::new()],
            product_marker: "id=".to_string(),
        }
    }
}

/// Link discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of link-discovery passes
    pub levels: u32,

    /// Selector for hyperlinks; the `href` attribute is collected
    #[serde(rename = "link-selector")]
    pub link_selector: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            levels: 2,
            link_selector: "a[href]".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "ShopSieve".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the dated CSV files
    #[serde(rename = "data-dir")]
    pub data_dir: String,

    /// Append-only error log
    #[serde(rename = "error-log")]
    pub error_log: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            error_log: "./scraper-error.log".to_string(),
        }
    }
}

/// Rules for pulling product fields out of a detail page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub title: FieldRule,
    pub price: FieldRule,

    /// Always made absolute: a missing prefix falls back to the base URL
    #[serde(rename = "image-url")]
    pub image_url: FieldRule,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            title: FieldRule::text("title"),
            price: FieldRule::text(".price"),
            image_url: FieldRule::attribute(".shirt-picture img", "src"),
        }
    }
}
