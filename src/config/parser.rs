use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// A configuration together with the file it was read from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,

    /// SHA-256 of the file content; `None` when running on defaults
    pub source_hash: Option<String>,
}

/// Loads the harvest configuration
///
/// Without a path the built-in defaults are used. With a path the file is
/// read once, parsed, validated and hashed.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use medref_harvest::config::load_config;
///
/// let loaded = load_config(Some(Path::new("harvest.toml"))).unwrap();
/// println!("Max retries: {}", loaded.config.crawler.max_retries);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(LoadedConfig {
            config: Config::default(),
            source_hash: None,
        });
    };

    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    Ok(LoadedConfig {
        config,
        source_hash: Some(content_hash(&content)),
    })
}

/// Parses and validates TOML configuration text
///
/// Missing tables and keys fall back to their defaults.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 of a configuration text
///
/// Logged at startup so reports from different runs can be tied back to the
/// configuration that produced them.
pub fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
