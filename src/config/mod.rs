//! Configuration module for spindle
//!
//! Crawl configuration comes from an optional TOML file overlaid with CLI
//! flags; everything has a default so a bare `--url` invocation works.

mod parser;
mod types;

pub use parser::{load_config, validate_config};
pub use types::{Config, CrawlerConfig, HttpConfig};
