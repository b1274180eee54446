//! Spindle: a recursive web crawler
//!
//! Given a seed URL, spindle fetches the page, extracts hyperlinks, filters
//! them through an ordered chain of policies (normalization, scoping,
//! deduplication, frontier exclusion) and recursively repeats for every
//! surviving link, accumulating visited/succeeded counts. Fan-out is bounded
//! by a fixed-size worker pool pulling from a shared work queue.

pub mod config;
pub mod crawler;
pub mod filter;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for spindle operations
#[derive(Debug, Error)]
pub enum SpindleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to resolve URL: {0}")]
    Resolve(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for spindle operations
pub type Result<T> = std::result::Result<T, SpindleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, CrawlerConfig, HttpConfig};
pub use crawler::{crawl, Coordinator, FetchOutcome};
pub use filter::{FilterPipeline, Stage};
pub use output::CrawlSummary;
pub use state::Frontier;
pub use url::{extract_host, resolve, strip_query};
