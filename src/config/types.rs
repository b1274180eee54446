use serde::Deserialize;

/// Main configuration structure for spindle
///
/// Resolved once at startup from an optional TOML file plus CLI flag
/// overrides; read-only for the lifetime of a crawl.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerConfig {
    /// Allow following links to hosts other than the seed's host
    #[serde(rename = "span-hosts", default)]
    pub span_hosts: bool,

    /// Never ascend above the seed URL's directory
    #[serde(rename = "no-parent", default)]
    pub no_parent: bool,

    /// Strip query strings (and fragments) from discovered links
    #[serde(rename = "strip-query", default)]
    pub strip_query: bool,

    /// Number of concurrent fetch workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Capacity of the shared work queue; full queue means claimed URLs
    /// wait in `send` rather than being dropped
    #[serde(rename = "queue-capacity", default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Optional wall-clock deadline for the whole crawl, in seconds
    #[serde(rename = "max-time", default)]
    pub max_time: Option<u64>,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Verify TLS certificates (off by default, matching wget-style
    /// exploratory crawling)
    #[serde(rename = "tls-verify", default)]
    pub tls_verify: bool,

    /// User agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

fn default_workers() -> usize {
    16
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("spindle/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            span_hosts: false,
            no_parent: false,
            strip_query: false,
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            max_time: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            tls_verify: false,
            user_agent: default_user_agent(),
        }
    }
}
