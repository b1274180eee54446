//! HTTP fetcher
//!
//! Wraps the shared `reqwest` client with error classification and the
//! frontier bookkeeping contract: exactly one visited-mark per call on
//! every branch, plus a succeeded-mark when a body was obtained. Transport
//! failures never propagate past this boundary; they become outcomes.

use crate::config::HttpConfig;
use crate::state::Frontier;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of one fetch attempt
///
/// Created per attempt and consumed immediately by the coordinator to
/// decide whether to extract links; only its effect on the frontier
/// persists.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The response carried a body
    Success(String),

    /// The response carried no usable body; counted as succeeded but never
    /// expanded
    Empty,

    /// The request exceeded the configured timeout
    Timeout,

    /// Connection, DNS, TLS or protocol-level failure
    Error(String),
}

/// Builds the HTTP client shared by all workers for the crawl's lifetime
///
/// Carries the resolved timeout and TLS policy so every fetch applies them
/// uniformly. Certificate verification is off unless `tls_verify` is set.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout))
        .connect_timeout(Duration::from_secs(config.timeout))
        .danger_accept_invalid_certs(!config.tls_verify)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, recording the attempt in the frontier
///
/// The HTTP status code is deliberately not inspected: any response with a
/// body counts as a success and is handed to link extraction, matching the
/// permissive behavior this crawler inherits. A response whose body cannot
/// be read still counts as visited but not succeeded.
pub async fn fetch_url(client: &Client, frontier: &Frontier, url: &Url) -> FetchOutcome {
    let outcome = match client.get(url.clone()).send().await {
        Ok(response) => match response.text().await {
            Ok(body) if body.is_empty() => FetchOutcome::Empty,
            Ok(body) => FetchOutcome::Success(body),
            Err(e) => classify_error(e),
        },
        Err(e) => classify_error(e),
    };

    frontier.mark_visited(url);
    if matches!(outcome, FetchOutcome::Success(_) | FetchOutcome::Empty) {
        frontier.mark_succeeded(url);
    }

    outcome
}

fn classify_error(e: reqwest::Error) -> FetchOutcome {
    if e.is_timeout() {
        FetchOutcome::Timeout
    } else if e.is_connect() {
        FetchOutcome::Error(format!("connection failed: {}", e))
    } else {
        FetchOutcome::Error(e.to_string())
    }
}
