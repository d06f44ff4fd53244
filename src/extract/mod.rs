//! HTML extraction
//!
//! This module turns fetched HTML into data:
//! - Field extraction driven by an [`ExtractionTemplate`]
//! - Hyperlink collection for the link crawler

mod template;

pub use template::{ExtractedFields, ExtractionTemplate, FieldRule};

use scraper::{Html, Selector};

/// Collects the raw `href` values of every element matching `selector`
///
/// Values are returned as written in the document, in document order;
/// resolution and filtering are left to the caller.
///
/// # Example
///
/// ```
/// use scraper::Selector;
/// use shop_sieve::extract::extract_hrefs;
///
/// let selector = Selector::parse("a[href]").unwrap();
/// let html = r#"<a href="shirts.php">Shirts</a><a>no target</a><a href="contact.php">Contact</a>"#;
/// assert_eq!(extract_hrefs(html, &selector), vec!["shirts.php", "contact.php"]);
/// ```
pub fn extract_hrefs(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}
