//! Configuration module for medref-harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a harvest can run with no
//! file at all.
//!
//! # Example
//!
//! ```no_run
//! use medref_harvest::config::load_config;
//! use std::path::Path;
//!
//! let loaded = load_config(Some(Path::new("harvest.toml"))).unwrap();
//! println!("Politeness delay: {:?}", loaded.config.crawler.delay());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, SiteConfig};

// Re-export parser functions
pub use parser::{content_hash, load_config, parse_config, LoadedConfig};
pub use validation::validate;
