use crate::ConfigError;
use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

/// How to pull one value out of a document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldRule {
    /// CSS selector; the first match is used
    pub selector: String,

    /// Attribute to read instead of the element's text
    #[serde(default)]
    pub attribute: Option<String>,

    /// Base that relative values are resolved against
    #[serde(default)]
    pub prefix: Option<String>,
}

impl FieldRule {
    /// Rule reading the trimmed text of the first match
    pub fn text(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attribute: None,
            prefix: None,
        }
    }

    /// Rule reading an attribute of the first match
    pub fn attribute(selector: &str, attribute: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attribute: Some(attribute.to_string()),
            prefix: None,
        }
    }

    /// Sets the prefix relative values are resolved against
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Applies the prefix to an extracted value
    ///
    /// A prefix that parses as a URL is joined with the value, so absolute
    /// values are kept and relative ones are resolved. Any other prefix is
    /// prepended verbatim.
    fn apply_prefix(&self, value: String) -> String {
        let Some(prefix) = &self.prefix else {
            return value;
        };

        if value.is_empty() {
            return value;
        }

        match Url::parse(prefix).and_then(|base| base.join(&value)) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", prefix, value),
        }
    }
}

/// A compiled field rule
#[derive(Debug, Clone)]
struct CompiledField {
    name: String,
    rule: FieldRule,
    selector: Selector,
}

/// Ordered set of named field rules, with selectors compiled up front
///
/// # Example
///
/// ```
/// use shop_sieve::extract::{ExtractionTemplate, FieldRule};
///
/// let template = ExtractionTemplate::new(vec![
///     ("Title".to_string(), FieldRule::text("title")),
///     ("Price".to_string(), FieldRule::text(".price")),
/// ])
/// .unwrap();
///
/// let fields = template.extract(
///     "<html><head><title>Logo Shirt</title></head><body><span class='price'>$18</span></body></html>",
/// );
/// assert_eq!(fields.get("Title"), Some("Logo Shirt"));
/// assert_eq!(fields.get("Price"), Some("$18"));
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionTemplate {
    fields: Vec<CompiledField>,
}

impl ExtractionTemplate {
    /// Compiles the template, failing on the first invalid selector
    pub fn new(fields: Vec<(String, FieldRule)>) -> Result<Self, ConfigError> {
        let fields = fields
            .into_iter()
            .map(|(name, rule)| {
                let selector = Selector::parse(&rule.selector).map_err(|e| {
                    ConfigError::InvalidSelector(format!("'{}': {:?}", rule.selector, e))
                })?;
                Ok(CompiledField {
                    name,
                    rule,
                    selector,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { fields })
    }

    /// Field names in template order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Extracts every field from an HTML document
    ///
    /// A selector with no match, or a match lacking the requested attribute,
    /// yields an empty value.
    pub fn extract(&self, html: &str) -> ExtractedFields {
        let document = Html::parse_document(html);

        let values = self
            .fields
            .iter()
            .map(|field| {
                let raw = extract_value(&document, field);
                let value = field.rule.apply_prefix(raw.unwrap_or_default());
                (field.name.clone(), value)
            })
            .collect();

        ExtractedFields { values }
    }
}

fn extract_value(document: &Html, field: &CompiledField) -> Option<String> {
    let element = document.select(&field.selector).next()?;

    match &field.rule.attribute {
        Some(attribute) => element
            .value()
            .attr(attribute)
            .map(|value| value.trim().to_string()),
        None => Some(element.text().collect::<String>().trim().to_string()),
    }
}

/// Values produced by [`ExtractionTemplate::extract`], in template order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    values: Vec<(String, String)>,
}

impl ExtractedFields {
    /// Returns the value for a field name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Removes a field, returning its value or an empty string
    pub fn take(&mut self, name: &str) -> String {
        match self.values.iter().position(|(field, _)| field == name) {
            Some(index) => self.values.remove(index).1,
            None => String::new(),
        }
    }

    /// Iterates over `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}
