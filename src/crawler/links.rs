//! Link discovery
//!
//! Each level fetches every path of the previous level at once, collects
//! the hyperlinks, keeps site-relative ones and removes duplicates. The
//! output of the last level is the crawl result.

use crate::crawler::fetcher::fetch_page;
use crate::extract::extract_hrefs;
use crate::url::{dedup_preserving_order, resolve_path, retain_site_relative};
use crate::{Result, ShopSieveError};
use futures::future::try_join_all;
use reqwest::Client;
use scraper::Selector;
use url::Url;

/// Runs `levels` rounds of link discovery starting from `seeds`
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `base` - Site base URL every path is resolved against
/// * `seeds` - Paths for the first level ("" is the homepage)
/// * `levels` - Number of rounds; 0 returns the site-relative seeds, deduplicated
/// * `link_selector` - Elements whose `href` is collected
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Site-relative links of the last level, first-seen order
/// * `Err(ShopSieveError)` - Any page of any level could not be fetched
pub async fn crawl_links(
    client: &Client,
    base: &Url,
    seeds: &[String],
    levels: u32,
    link_selector: &Selector,
) -> Result<Vec<String>> {
    if levels == 0 {
        return Ok(dedup_preserving_order(retain_site_relative(
            seeds.iter().cloned(),
        )));
    }

    let mut current = dedup_preserving_order(seeds.iter().cloned());

    for level in 1..=levels {
        tracing::info!("Crawl level {}: fetching {} pages", level, current.len());
        current = crawl_level(client, base, &current, link_selector).await?;
        tracing::info!("Crawl level {}: found {} site links", level, current.len());
    }

    Ok(current)
}

/// Fetches every path concurrently and merges their site-relative links
pub async fn crawl_level(
    client: &Client,
    base: &Url,
    paths: &[String],
    link_selector: &Selector,
) -> Result<Vec<String>> {
    let fetches = paths.iter().map(|path| async move {
        let url = resolve_path(base, path)?;
        let html = fetch_page(client, url.as_str()).await?;
        Ok::<_, ShopSieveError>(extract_hrefs(&html, link_selector))
    });

    let per_page = try_join_all(fetches).await?;

    Ok(dedup_preserving_order(retain_site_relative(
        per_page.into_iter().flatten(),
    )))
}
