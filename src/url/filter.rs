use crate::url::resolve_path;
use std::collections::HashSet;
use url::Url;

/// Returns true if a link names a page on the crawled site by relative path
///
/// Rejected:
/// - anything containing `http` (an absolute link, usually off-site)
/// - anything containing `./` (self or parent references)
/// - empty and fragment-only links
/// - protocol-relative links (`//host/path`)
/// - anything carrying its own scheme (`mailto:`, `javascript:`, `ftp:`, ...)
///
/// # Examples
///
/// ```
/// use shop_sieve::url::is_site_relative;
///
/// assert!(is_site_relative("shirts.php"));
/// assert!(!is_site_relative("http://twitter.com/treehouse"));
/// assert!(!is_site_relative("../index.php"));
/// assert!(!is_site_relative("//cdn.example.net/shirt.php?id=9"));
/// ```
pub fn is_site_relative(link: &str) -> bool {
    let link = link.trim();

    if link.is_empty() || link.starts_with('#') {
        return false;
    }

    if link.starts_with("//") || link.starts_with("\\\\") {
        return false;
    }

    // Only relative references fail to parse without a base
    if Url::parse(link).is_ok() {
        return false;
    }

    !link.contains("http") && !link.contains("./")
}

/// Keeps only site-relative links, trimmed
pub fn retain_site_relative<I>(links: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    links
        .into_iter()
        .filter(|link| is_site_relative(link))
        .map(|link| link.trim().to_string())
        .collect()
}

/// Removes exact duplicates, keeping the first occurrence of each value
///
/// # Examples
///
/// ```
/// use shop_sieve::url::dedup_preserving_order;
///
/// let links = vec!["b".to_string(), "a".to_string(), "b".to_string()];
/// assert_eq!(dedup_preserving_order(links), vec!["b".to_string(), "a".to_string()]);
/// ```
pub fn dedup_preserving_order<I>(links: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

/// Selects product-page URLs and resolves them to absolute form
///
/// A URL is a product page when it contains `marker` (`id=` on the default
/// site). This is a substring heuristic: `/video?id=3` qualifies just as well
/// as `/shirt.php?id=101`. A stricter pattern would need per-site knowledge,
/// so the plain substring test is kept.
///
/// Already absolute URLs on the site pass through unchanged, so filtering
/// twice yields the same list. URLs resolving to another host are dropped.
/// Distinct paths that resolve to the same URL collapse to one entry.
pub fn filter_products(base: &Url, urls: &[String], marker: &str) -> Vec<String> {
    let resolved = urls
        .iter()
        .filter(|url| url.contains(marker))
        .filter_map(|path| match resolve_path(base, path) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                tracing::debug!("Skipping product link {}: {}", path, e);
                None
            }
        });

    dedup_preserving_order(resolved)
}
