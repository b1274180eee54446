//! Frontier: the authoritative record of crawl progress
//!
//! Three sets of canonical URL strings, guarded by a single lock:
//!
//! - `visited`: a fetch was attempted, regardless of outcome
//! - `succeeded`: a fetch returned a body
//! - `claimed`: discovered and scheduled, so concurrent siblings that
//!   discover the same link cannot schedule it twice
//!
//! Invariants: `succeeded` is a subset of `visited`; a URL enters `claimed`
//! at most once per crawl. All mutation goes through these methods, never
//! through shared raw collections.

use std::collections::HashSet;
use std::sync::Mutex;
use url::Url;

#[derive(Debug, Default)]
struct FrontierInner {
    visited: HashSet<String>,
    succeeded: HashSet<String>,
    claimed: HashSet<String>,
}

/// Shared crawl state with synchronized access
///
/// Owned by the coordinator and handed to workers behind an `Arc`; every
/// operation takes the lock for the duration of one set update, so
/// concurrent callers observe a serializable ordering of claims.
#[derive(Debug, Default)]
pub struct Frontier {
    inner: Mutex<FrontierInner>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a fetch of this URL was attempted
    ///
    /// Idempotent; called exactly once per fetch regardless of outcome.
    pub fn mark_visited(&self, url: &Url) {
        let mut inner = self.inner.lock().unwrap();
        inner.visited.insert(url.as_str().to_string());
    }

    /// Records that a fetch of this URL returned a body
    ///
    /// Idempotent. The fetcher marks visited first on every branch, which
    /// keeps `succeeded` a subset of `visited`.
    pub fn mark_succeeded(&self, url: &Url) {
        let mut inner = self.inner.lock().unwrap();
        debug_assert!(inner.visited.contains(url.as_str()));
        inner.succeeded.insert(url.as_str().to_string());
    }

    /// Atomically reserves the candidates not yet claimed
    ///
    /// For each candidate not already in `claimed`, adds it and includes it
    /// in the returned list; already-claimed candidates are silently
    /// dropped. This single atomic step is what prevents duplicate dispatch
    /// when two concurrent workers discover the same link: no two calls can
    /// both return the same URL.
    pub fn claim(&self, candidates: Vec<Url>) -> Vec<Url> {
        let mut inner = self.inner.lock().unwrap();
        candidates
            .into_iter()
            .filter(|url| inner.claimed.insert(url.as_str().to_string()))
            .collect()
    }

    /// Returns whether a fetch of this URL was already attempted
    pub fn is_visited(&self, url: &Url) -> bool {
        self.inner.lock().unwrap().visited.contains(url.as_str())
    }

    /// Returns whether this URL was already claimed for processing
    pub fn is_claimed(&self, url: &Url) -> bool {
        self.inner.lock().unwrap().claimed.contains(url.as_str())
    }

    /// Number of URLs with an attempted fetch
    pub fn visited_count(&self) -> usize {
        self.inner.lock().unwrap().visited.len()
    }

    /// Number of URLs fetched successfully
    pub fn succeeded_count(&self) -> usize {
        self.inner.lock().unwrap().succeeded.len()
    }

    /// Number of URLs claimed for processing
    pub fn claimed_count(&self) -> usize {
        self.inner.lock().unwrap().claimed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn u(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_mark_visited_idempotent() {
        let frontier = Frontier::new();
        frontier.mark_visited(&u("https://example.com/a"));
        frontier.mark_visited(&u("https://example.com/a"));
        assert_eq!(frontier.visited_count(), 1);
        assert!(frontier.is_visited(&u("https://example.com/a")));
    }

    #[test]
    fn test_succeeded_subset_of_visited() {
        let frontier = Frontier::new();
        let url = u("https://example.com/a");
        frontier.mark_visited(&url);
        frontier.mark_succeeded(&url);
        frontier.mark_succeeded(&url);
        assert_eq!(frontier.visited_count(), 1);
        assert_eq!(frontier.succeeded_count(), 1);
    }

    #[test]
    fn test_claim_returns_only_new_urls() {
        let frontier = Frontier::new();
        let first = frontier.claim(vec![u("https://example.com/a"), u("https://example.com/b")]);
        assert_eq!(first.len(), 2);

        let second = frontier.claim(vec![u("https://example.com/b"), u("https://example.com/c")]);
        assert_eq!(second, vec![u("https://example.com/c")]);
        assert_eq!(frontier.claimed_count(), 3);
    }

    #[test]
    fn test_claim_drops_in_batch_duplicates_across_calls() {
        let frontier = Frontier::new();
        frontier.claim(vec![u("https://example.com/a")]);
        let again = frontier.claim(vec![u("https://example.com/a")]);
        assert!(again.is_empty());
    }

    #[test]
    fn test_concurrent_claims_never_overlap() {
        let frontier = Arc::new(Frontier::new());
        let candidates: Vec<Url> = (0..100)
            .map(|i| u(&format!("https://example.com/page{}", i)))
            .collect();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let frontier = Arc::clone(&frontier);
            let candidates = candidates.clone();
            handles.push(std::thread::spawn(move || frontier.claim(candidates)));
        }

        let mut all_claimed = Vec::new();
        for handle in handles {
            all_claimed.extend(handle.join().unwrap());
        }

        // Union of all returned sets is exactly the candidate set, with no
        // URL returned by more than one caller.
        assert_eq!(all_claimed.len(), candidates.len());
        let unique: HashSet<&str> = all_claimed.iter().map(|u| u.as_str()).collect();
        assert_eq!(unique.len(), candidates.len());
    }
}
