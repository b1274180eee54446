//! Crawl summary output

use std::time::Duration;

/// Totals for one finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// URLs with an attempted fetch, regardless of outcome
    pub visited: usize,

    /// URLs whose fetch returned a body
    pub succeeded: usize,

    /// Wall-clock time for the whole crawl
    pub elapsed: Duration,
}

impl CrawlSummary {
    /// Whether the crawl retrieved anything at all
    ///
    /// A crawl with zero successes maps to a non-zero exit status.
    pub fn fetched_anything(&self) -> bool {
        self.succeeded > 0
    }
}

/// Prints the end-of-crawl summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    println!("Completed");
    println!("Visited urls: {}", summary.visited);
    println!("Success visited urls: {}", summary.succeeded);
    println!("Elapsed: {:.2}s", summary.elapsed.as_secs_f64());
}
