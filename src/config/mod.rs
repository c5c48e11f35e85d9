//! Configuration module for the CRD scraper
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section has defaults, so a scrape can run without a file.
//!
//! # Example
//!
//! ```no_run
//! use crd_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Archive: {}", config.scraper.archive_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, OutputConfig, ScraperConfig, SiteConfig, DEFAULT_ARCHIVE_URL,
    DEFAULT_DATA_PATH,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
