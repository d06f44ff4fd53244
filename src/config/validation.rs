use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, TemplateConfig};
use crate::extract::FieldRule;
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_name(&config.user_agent.crawler_name)?;
    validate_output_config(&config.output)?;
    validate_template_config(&config.template)?;
    Ok(())
}

/// Validates the site section
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "seeds must contain at least one path".to_string(),
        ));
    }

    if config.product_marker.is_empty() {
        return Err(ConfigError::Validation(
            "product-marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.levels < 1 {
        return Err(ConfigError::Validation(format!(
            "levels must be >= 1, got {}",
            config.levels
        )));
    }

    validate_selector(&config.link_selector)
}

/// Crawler name must be non-empty, alphanumeric plus hyphens
fn validate_user_agent_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            name
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "data-dir cannot be empty".to_string(),
        ));
    }

    if config.error_log.is_empty() {
        return Err(ConfigError::Validation(
            "error-log cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Every template selector must compile
fn validate_template_config(config: &TemplateConfig) -> Result<(), ConfigError> {
    for rule in [&config.title, &config.price, &config.image_url] {
        validate_field_rule(rule)?;
    }
    Ok(())
}

fn validate_field_rule(rule: &FieldRule) -> Result<(), ConfigError> {
    validate_selector(&rule.selector)?;

    if let Some(attribute) = &rule.attribute {
        if attribute.is_empty() {
            return Err(ConfigError::Validation(format!(
                "attribute for selector '{}' cannot be empty",
                rule.selector
            )));
        }
    }

    Ok(())
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}
