//! Link filter pipeline
//!
//! After a page is fetched, its raw hrefs pass through normalization and an
//! ordered chain of [`Stage`]s chosen once from configuration. The result
//! is exactly the set of links that are new, in scope, and not already
//! queued: safe to claim and dispatch.
//!
//! Stage order is significant: StripQuery runs before Deduplicate so that
//! syntactically different but semantically identical hrefs collapse, and
//! the scope stages run before the frontier-exclusion stages so that
//! scope-rejected URLs are never recorded as claimed.

mod stage;

pub use stage::{Stage, StageContext};

use crate::config::Config;
use crate::state::Frontier;
use crate::url::{extract_host, resolve};
use std::sync::Arc;
use url::Url;

/// The ordered link filter chain for one crawl
///
/// Built once at startup from the resolved configuration; the active stage
/// list is inspectable via [`FilterPipeline::stages`] so each configuration
/// can be asserted against directly.
pub struct FilterPipeline {
    seed_host: String,
    seed_port: Option<u16>,
    seed_dir: String,
    stages: Vec<Stage>,
    frontier: Arc<Frontier>,
}

impl FilterPipeline {
    /// Builds the active pipeline for a crawl
    ///
    /// Stages for disabled features are omitted from the list rather than
    /// branched on at call time.
    pub fn new(config: &Config, seed: &Url, frontier: Arc<Frontier>) -> Self {
        let mut stages = Vec::new();

        if config.crawler.strip_query {
            stages.push(Stage::StripQuery);
        }
        stages.push(Stage::Deduplicate);
        if !config.crawler.span_hosts {
            stages.push(Stage::HostScope);
        }
        if config.crawler.no_parent {
            stages.push(Stage::ParentScope);
        }
        stages.push(Stage::ExcludeVisited);
        stages.push(Stage::ExcludeClaimed);

        Self {
            seed_host: extract_host(seed).unwrap_or_default(),
            seed_port: seed.port_or_known_default(),
            seed_dir: seed_directory(seed),
            stages,
            frontier,
        }
    }

    /// The active ordered stage list
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Runs the full chain over one page's raw hrefs
    ///
    /// Normalization against the source page is the fixed entry step; hrefs
    /// the resolver rejects are dropped with a debug log. The returned
    /// batch is duplicate-free and preserves discovery order.
    pub fn run(&self, raw_hrefs: &[String], source: &Url) -> Vec<Url> {
        let mut links = Vec::with_capacity(raw_hrefs.len());
        for href in raw_hrefs {
            match resolve(href, source) {
                Ok(url) => links.push(url),
                Err(e) => tracing::debug!("Dropping unresolvable href {:?}: {}", href, e),
            }
        }

        let ctx = StageContext {
            seed_host: &self.seed_host,
            seed_port: self.seed_port,
            seed_dir: &self.seed_dir,
            frontier: &self.frontier,
        };

        for stage in &self.stages {
            let before = links.len();
            links = stage.apply(links, &ctx);
            tracing::trace!(
                stage = stage.name(),
                before,
                after = links.len(),
                "applied filter stage"
            );
        }

        links
    }
}

/// The seed URL's directory: its path truncated after the last `/`
///
/// `/dir/page` becomes `/dir/`; a bare `/` stays `/`.
fn seed_directory(seed: &Url) -> String {
    let path = seed.path();
    match path.rfind('/') {
        Some(idx) => path[..=idx].to_string(),
        None => "/".to_string(),
    }
}
