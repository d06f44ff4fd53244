//! URL handling module for Shop-Sieve
//!
//! This module resolves site-relative paths against the base URL and holds
//! the pure link-set operations: in-site filtering, order-preserving
//! deduplication, and product-page selection.

mod filter;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use filter::{
    dedup_preserving_order, filter_products, is_site_relative, retain_site_relative,
};

/// Parses the site base URL, accepting only http and https
///
/// # Examples
///
/// ```
/// use shop_sieve::url::parse_base_url;
///
/// let base = parse_base_url("http://www.shirts4mike.com/").unwrap();
/// assert_eq!(base.host_str(), Some("www.shirts4mike.com"));
///
/// assert!(parse_base_url("mailto:someone@example.com").is_err());
/// ```
pub fn parse_base_url(base_url: &str) -> UrlResult<Url> {
    let url =
        Url::parse(base_url).map_err(|e| UrlError::Parse(format!("{}: {}", base_url, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlError::InvalidScheme(other.to_string())),
    }
}

/// Resolves a site path (or an already absolute URL) against the base URL
///
/// The empty path resolves to the base URL itself, which is how the
/// homepage is addressed. A result on another host or port is an
/// [`UrlError::OffSite`] error.
///
/// # Examples
///
/// ```
/// use shop_sieve::url::{parse_base_url, resolve_path};
///
/// let base = parse_base_url("http://www.shirts4mike.com/").unwrap();
/// assert_eq!(resolve_path(&base, "").unwrap().as_str(), "http://www.shirts4mike.com/");
/// assert_eq!(
///     resolve_path(&base, "shirt.php?id=101").unwrap().as_str(),
///     "http://www.shirts4mike.com/shirt.php?id=101"
/// );
/// ```
pub fn resolve_path(base: &Url, path: &str) -> UrlResult<Url> {
    let url = base
        .join(path.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", path, e)))?;

    let same_site = url.host_str() == base.host_str()
        && url.port_or_known_default() == base.port_or_known_default();
    if !same_site {
        return Err(UrlError::OffSite(url.to_string()));
    }

    Ok(url)
}
