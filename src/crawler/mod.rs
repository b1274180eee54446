//! Crawler module for web page fetching and processing
//!
//! Contains the fetcher (HTTP plus frontier bookkeeping), raw href
//! extraction, and the coordinator that drives the bounded worker pool.

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use parser::extract_hrefs;
