use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates site addressing
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            config.base_url
        )));
    }

    // Relative joins drop the last path segment otherwise
    if !config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base_url must end with '/', got '{}'",
            config.base_url
        )));
    }

    if config.index_path.is_empty() {
        return Err(ConfigError::Validation(
            "index_path cannot be empty".to_string(),
        ));
    }

    if config.keys().is_empty() {
        return Err(ConfigError::Validation(
            "index_keys must name at least one index page".to_string(),
        ));
    }

    if !config.leaf_namespace.starts_with('/') || !config.leaf_namespace.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "leaf_namespace must start and end with '/', got '{}'",
            config.leaf_namespace
        )));
    }

    validate_print_query(&config.print_query)?;

    if config.pubdate_selector.trim().is_empty() {
        return Err(ConfigError::Validation(
            "pubdate_selector cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// The printable-variant query must be a single `key=value` pair
fn validate_print_query(query: &str) -> Result<(), ConfigError> {
    match query.split_once('=') {
        Some((key, value)) if !key.is_empty() && !value.contains('&') => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "print_query must be a single key=value pair, got '{}'",
            query
        ))),
    }
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
