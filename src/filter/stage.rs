//! Link filter stages
//!
//! Each stage is a named pure transformation over a batch of canonical
//! URLs. The two frontier-exclusion stages read (never write) frontier
//! state; everything else depends only on its inputs and the seed context.

use crate::state::Frontier;
use crate::url::{extract_host, strip_query};
use std::collections::HashSet;
use url::Url;

/// Immutable context shared by all stages of one pipeline run
pub struct StageContext<'a> {
    /// Host of the seed URL
    pub seed_host: &'a str,

    /// Port of the seed URL (scheme default when unspecified)
    pub seed_port: Option<u16>,

    /// Directory of the seed URL: its path truncated after the last `/`
    pub seed_dir: &'a str,

    /// Frontier read by the exclusion stages
    pub frontier: &'a Frontier,
}

/// A named link-set transformation
///
/// The active ordered list is decided once from configuration when the
/// pipeline is built; stages for disabled features are simply absent, so
/// there is no per-call configuration branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Drop query strings and fragments so semantically identical links
    /// collapse during deduplication
    StripQuery,

    /// Collapse exact duplicates within this batch, keeping first
    /// occurrence order
    Deduplicate,

    /// Keep only URLs on the seed's host (and port)
    HostScope,

    /// Keep only URLs at or below the seed URL's directory
    ParentScope,

    /// Drop URLs whose fetch was already attempted
    ExcludeVisited,

    /// Drop URLs already reserved for processing
    ExcludeClaimed,
}

impl Stage {
    /// Stage name for logging and pipeline inspection
    pub fn name(&self) -> &'static str {
        match self {
            Stage::StripQuery => "strip-query",
            Stage::Deduplicate => "deduplicate",
            Stage::HostScope => "host-scope",
            Stage::ParentScope => "parent-scope",
            Stage::ExcludeVisited => "exclude-visited",
            Stage::ExcludeClaimed => "exclude-claimed",
        }
    }

    /// Applies this stage to a batch of links
    pub fn apply(&self, links: Vec<Url>, ctx: &StageContext<'_>) -> Vec<Url> {
        match self {
            Stage::StripQuery => links.iter().map(strip_query).collect(),

            Stage::Deduplicate => {
                let mut seen = HashSet::new();
                links
                    .into_iter()
                    .filter(|url| seen.insert(url.as_str().to_string()))
                    .collect()
            }

            Stage::HostScope => links
                .into_iter()
                .filter(|url| on_seed_host(url, ctx))
                .collect(),

            Stage::ParentScope => links
                .into_iter()
                .filter(|url| on_seed_host(url, ctx) && url.path().starts_with(ctx.seed_dir))
                .collect(),

            Stage::ExcludeVisited => links
                .into_iter()
                .filter(|url| !ctx.frontier.is_visited(url))
                .collect(),

            Stage::ExcludeClaimed => links
                .into_iter()
                .filter(|url| !ctx.frontier.is_claimed(url))
                .collect(),
        }
    }
}

/// Host-and-port equality against the seed, matching the original
/// authority comparison (two servers on different ports are different
/// hosts for scoping purposes)
fn on_seed_host(url: &Url, ctx: &StageContext<'_>) -> bool {
    extract_host(url).as_deref() == Some(ctx.seed_host)
        && url.port_or_known_default() == ctx.seed_port
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn ctx<'a>(frontier: &'a Frontier, seed_host: &'a str, seed_dir: &'a str) -> StageContext<'a> {
        StageContext {
            seed_host,
            seed_port: Some(443),
            seed_dir,
            frontier,
        }
    }

    #[test]
    fn test_strip_query_stage() {
        let frontier = Frontier::new();
        let links = vec![u("https://host.test/a?x=1"), u("https://host.test/b")];
        let out = Stage::StripQuery.apply(links, &ctx(&frontier, "host.test", "/"));
        assert_eq!(out, vec![u("https://host.test/a"), u("https://host.test/b")]);
    }

    #[test]
    fn test_deduplicate_keeps_first_occurrence() {
        let frontier = Frontier::new();
        let links = vec![
            u("https://host.test/a"),
            u("https://host.test/b"),
            u("https://host.test/a"),
        ];
        let out = Stage::Deduplicate.apply(links, &ctx(&frontier, "host.test", "/"));
        assert_eq!(out, vec![u("https://host.test/a"), u("https://host.test/b")]);
    }

    #[test]
    fn test_host_scope_keeps_seed_host_only() {
        let frontier = Frontier::new();
        let links = vec![
            u("https://host.test/a"),
            u("https://other.test/b"),
            u("https://host.test/c"),
        ];
        let out = Stage::HostScope.apply(links, &ctx(&frontier, "host.test", "/"));
        assert_eq!(out, vec![u("https://host.test/a"), u("https://host.test/c")]);
    }

    #[test]
    fn test_host_scope_distinguishes_ports() {
        let frontier = Frontier::new();
        let context = StageContext {
            seed_host: "127.0.0.1",
            seed_port: Some(8080),
            seed_dir: "/",
            frontier: &frontier,
        };
        let links = vec![u("http://127.0.0.1:8080/a"), u("http://127.0.0.1:9090/b")];
        let out = Stage::HostScope.apply(links, &context);
        assert_eq!(out, vec![u("http://127.0.0.1:8080/a")]);
    }

    #[test]
    fn test_parent_scope_keeps_seed_directory() {
        // Seed https://host.test/dir/page: siblings under /dir/ stay,
        // anything above or beside the directory goes.
        let frontier = Frontier::new();
        let links = vec![u("https://host.test/dir/sub"), u("https://host.test/other")];
        let out = Stage::ParentScope.apply(links, &ctx(&frontier, "host.test", "/dir/"));
        assert_eq!(out, vec![u("https://host.test/dir/sub")]);
    }

    #[test]
    fn test_parent_scope_rejects_sibling_directory_with_shared_prefix() {
        // True path-ancestry comparison: /dirX is outside /dir/ even though
        // the original substring containment would have admitted it.
        let frontier = Frontier::new();
        let links = vec![u("https://host.test/dirX/page"), u("https://host.test/dir/page")];
        let out = Stage::ParentScope.apply(links, &ctx(&frontier, "host.test", "/dir/"));
        assert_eq!(out, vec![u("https://host.test/dir/page")]);
    }

    #[test]
    fn test_parent_scope_rejects_other_hosts() {
        let frontier = Frontier::new();
        let links = vec![u("https://other.test/dir/sub")];
        let out = Stage::ParentScope.apply(links, &ctx(&frontier, "host.test", "/dir/"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_exclude_visited() {
        let frontier = Frontier::new();
        frontier.mark_visited(&u("https://host.test/seen"));
        let links = vec![u("https://host.test/seen"), u("https://host.test/new")];
        let out = Stage::ExcludeVisited.apply(links, &ctx(&frontier, "host.test", "/"));
        assert_eq!(out, vec![u("https://host.test/new")]);
    }

    #[test]
    fn test_exclude_claimed() {
        let frontier = Frontier::new();
        frontier.claim(vec![u("https://host.test/queued")]);
        let links = vec![u("https://host.test/queued"), u("https://host.test/new")];
        let out = Stage::ExcludeClaimed.apply(links, &ctx(&frontier, "host.test", "/"));
        assert_eq!(out, vec![u("https://host.test/new")]);
    }
}
