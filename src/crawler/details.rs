//! Product detail aggregation
//!
//! Every product page is fetched at once and joined all-or-nothing: one
//! failed page fails the whole batch, and the records come back in the order
//! of the input URLs regardless of which response arrived first.

use crate::config::TemplateConfig;
use crate::crawler::fetcher::fetch_page;
use crate::extract::ExtractionTemplate;
use crate::{ConfigResult, Result};
use chrono::Utc;
use futures::future::try_join_all;
use reqwest::Client;
use serde::Serialize;
use url::Url;

pub const TITLE_FIELD: &str = "Title";
pub const PRICE_FIELD: &str = "Price";
pub const IMAGE_URL_FIELD: &str = "ImageURL";

/// Format of the scrape timestamp (UTC, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One scraped product
///
/// Serialized field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Price")]
    pub price: String,

    #[serde(rename = "ImageURL")]
    pub image_url: String,

    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "Time")]
    pub time: String,
}

/// Builds the product extraction template from configuration
///
/// ImageURL always ends up absolute: without a configured prefix it is
/// resolved against the site base URL.
pub fn product_template(template: &TemplateConfig, base: &Url) -> ConfigResult<ExtractionTemplate> {
    let mut image_url = template.image_url.clone();
    if image_url.prefix.is_none() {
        image_url.prefix = Some(base.to_string());
    }

    ExtractionTemplate::new(vec![
        (TITLE_FIELD.to_string(), template.title.clone()),
        (PRICE_FIELD.to_string(), template.price.clone()),
        (IMAGE_URL_FIELD.to_string(), image_url),
    ])
}

/// Current UTC time in [`TIMESTAMP_FORMAT`]
pub fn scrape_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Fetches one product page and builds its record
pub async fn fetch_product(
    client: &Client,
    template: &ExtractionTemplate,
    url: &str,
) -> Result<ProductRecord> {
    let html = fetch_page(client, url).await?;
    let mut fields = template.extract(&html);

    for (name, value) in fields.iter() {
        if value.is_empty() {
            tracing::warn!("No {} found on {}", name, url);
        }
    }

    Ok(ProductRecord {
        title: fields.take(TITLE_FIELD),
        price: fields.take(PRICE_FIELD),
        image_url: fields.take(IMAGE_URL_FIELD),
        url: url.to_string(),
        time: scrape_timestamp(),
    })
}

/// Fetches details for every product URL concurrently
///
/// # Returns
///
/// * `Ok(Vec<ProductRecord>)` - One record per URL, in input order
/// * `Err(ShopSieveError)` - The first failure; no partial results
pub async fn fetch_all_details(
    client: &Client,
    template: &ExtractionTemplate,
    urls: &[String],
) -> Result<Vec<ProductRecord>> {
    tracing::info!("Fetching details for {} products", urls.len());

    let fetches = urls
        .iter()
        .map(|url| fetch_product(client, template, url));

    let records = try_join_all(fetches).await?;

    tracing::info!("Fetched {} product records", records.len());
    Ok(records)
}
