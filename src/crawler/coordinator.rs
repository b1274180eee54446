//! Crawl coordination
//!
//! The coordinator owns the frontier, the filter pipeline and the shared
//! HTTP client, and drives a fixed-size pool of workers pulling from one
//! bounded work queue. Every claimed URL is counted as outstanding from the
//! moment it is enqueued until its processing finishes; the crawl is done
//! when that count reaches zero, meaning the queue is empty and nothing is
//! in flight.
//!
//! Back-pressure: when the queue is full, a worker enqueueing newly claimed
//! children parks in `send` until space frees up. Claimed URLs are never
//! dropped and never re-offered to `claim`.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::parser::extract_hrefs;
use crate::filter::FilterPipeline;
use crate::output::CrawlSummary;
use crate::state::Frontier;
use crate::{Result, UrlError};
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch, Mutex, Notify};
use tokio::task::JoinSet;
use url::Url;

/// Main crawl coordinator
pub struct Coordinator {
    config: Arc<Config>,
    seed: Url,
    frontier: Arc<Frontier>,
    pipeline: Arc<FilterPipeline>,
    client: Client,
}

impl Coordinator {
    /// Creates a coordinator for one crawl
    ///
    /// Validates the seed URL, builds the shared HTTP client with the
    /// resolved timeout and TLS policy, and assembles the filter pipeline
    /// from configuration.
    pub fn new(config: Config, seed_url: &str) -> Result<Self> {
        let seed = Url::parse(seed_url)?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(UrlError::InvalidScheme(seed.scheme().to_string()).into());
        }
        if seed.host_str().is_none() {
            return Err(UrlError::MissingHost.into());
        }

        let frontier = Arc::new(Frontier::new());
        let pipeline = Arc::new(FilterPipeline::new(&config, &seed, Arc::clone(&frontier)));
        let client = build_http_client(&config.http)?;

        Ok(Self {
            config: Arc::new(config),
            seed,
            frontier,
            pipeline,
            client,
        })
    }

    /// Runs the crawl to completion
    ///
    /// Spawns the worker pool, seeds the queue with the pre-claimed seed
    /// URL, waits until no work is outstanding (or the optional crawl
    /// deadline passes), then signals shutdown and joins the workers.
    pub async fn run(&self) -> Result<CrawlSummary> {
        let started = Instant::now();
        tracing::info!(seed = %self.seed, workers = self.config.crawler.workers, "starting crawl");

        let (queue_tx, queue_rx) = mpsc::channel::<Url>(self.config.crawler.queue_capacity);
        let queue_rx = Arc::new(Mutex::new(queue_rx));
        let outstanding = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(Notify::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        // The seed is treated as pre-claimed.
        let seeds = self.frontier.claim(vec![self.seed.clone()]);
        outstanding.store(seeds.len(), Ordering::SeqCst);
        for url in seeds {
            queue_tx.send(url).await.ok();
        }

        let mut workers = JoinSet::new();
        for id in 0..self.config.crawler.workers {
            let worker = Worker {
                id,
                client: self.client.clone(),
                frontier: Arc::clone(&self.frontier),
                pipeline: Arc::clone(&self.pipeline),
                queue_tx: queue_tx.clone(),
                queue_rx: Arc::clone(&queue_rx),
                outstanding: Arc::clone(&outstanding),
                done: Arc::clone(&done),
                shutdown: shutdown_rx.clone(),
            };
            workers.spawn(worker.run());
        }
        drop(queue_tx);

        let deadline = self.config.crawler.max_time.map(Duration::from_secs);
        self.wait_until_drained(&outstanding, &done, deadline).await;

        let _ = shutdown_tx.send(true);
        while workers.join_next().await.is_some() {}

        let summary = CrawlSummary {
            visited: self.frontier.visited_count(),
            succeeded: self.frontier.succeeded_count(),
            elapsed: started.elapsed(),
        };
        tracing::info!(
            visited = summary.visited,
            succeeded = summary.succeeded,
            elapsed = ?summary.elapsed,
            "crawl finished"
        );
        Ok(summary)
    }

    /// Blocks until the outstanding-URL count reaches zero
    ///
    /// With a deadline configured, returns early once it passes; the caller
    /// then raises the shutdown signal, cancelling in-flight fetches and
    /// preventing new claims.
    async fn wait_until_drained(
        &self,
        outstanding: &AtomicUsize,
        done: &Notify,
        deadline: Option<Duration>,
    ) {
        let drained = async {
            while outstanding.load(Ordering::SeqCst) > 0 {
                done.notified().await;
            }
        };

        match deadline {
            Some(limit) => {
                if tokio::time::timeout(limit, drained).await.is_err() {
                    tracing::warn!(?limit, "crawl deadline reached, shutting down");
                }
            }
            None => drained.await,
        }
    }
}

/// One member of the fetch worker pool
struct Worker {
    id: usize,
    client: Client,
    frontier: Arc<Frontier>,
    pipeline: Arc<FilterPipeline>,
    queue_tx: mpsc::Sender<Url>,
    queue_rx: Arc<Mutex<mpsc::Receiver<Url>>>,
    outstanding: Arc<AtomicUsize>,
    done: Arc<Notify>,
    shutdown: watch::Receiver<bool>,
}

impl Worker {
    async fn run(mut self) {
        loop {
            let queue = Arc::clone(&self.queue_rx);
            let url = tokio::select! {
                maybe = Self::next_url(&queue) => match maybe {
                    Some(url) => url,
                    None => break,
                },
                _ = self.shutdown.changed() => break,
            };
            self.process(url).await;
        }
        tracing::debug!(worker = self.id, "worker stopped");
    }

    // recv() is cancel safe, so losing the select race to the shutdown
    // branch cannot drop a URL.
    async fn next_url(queue: &Arc<Mutex<mpsc::Receiver<Url>>>) -> Option<Url> {
        queue.lock().await.recv().await
    }

    /// Handles one claimed URL: fetch, report, expand on success
    async fn process(&mut self, url: Url) {
        // The loop's receiver keeps its own view of the shutdown signal, so
        // this select must use a clone.
        let mut shutdown = self.shutdown.clone();
        let outcome = tokio::select! {
            outcome = fetch_url(&self.client, &self.frontier, &url) => Some(outcome),
            _ = shutdown.changed() => None,
        };

        match outcome {
            Some(FetchOutcome::Success(body)) => {
                println!("[+] {} visited", url);
                self.expand(&url, &body).await;
            }
            Some(FetchOutcome::Empty) => {
                println!("[+] {} visited", url);
                tracing::debug!(%url, "empty body, nothing to expand");
            }
            Some(FetchOutcome::Timeout) => {
                println!("[-] {} timed out", url);
            }
            Some(FetchOutcome::Error(cause)) => {
                println!("[x] {} error: {}", url, cause);
            }
            None => {
                tracing::debug!(%url, "fetch abandoned during shutdown");
            }
        }

        if self.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.done.notify_one();
        }
    }

    /// Extracts, filters, claims and enqueues a fetched page's links
    async fn expand(&self, source: &Url, body: &str) {
        if *self.shutdown.borrow() {
            return;
        }

        let hrefs = extract_hrefs(body);
        let candidates = self.pipeline.run(&hrefs, source);
        let newly_claimed = self.frontier.claim(candidates);
        tracing::debug!(
            %source,
            extracted = hrefs.len(),
            claimed = newly_claimed.len(),
            "expanded page"
        );

        // send() is cancel safe; racing it against the shutdown signal keeps
        // a worker parked on a full queue from outliving the crawl.
        let mut shutdown = self.shutdown.clone();
        for child in newly_claimed {
            // Counted before enqueueing so the drain check can never
            // observe an enqueued-but-uncounted URL.
            self.outstanding.fetch_add(1, Ordering::SeqCst);
            tokio::select! {
                sent = self.queue_tx.send(child) => {
                    if sent.is_err() {
                        self.outstanding.fetch_sub(1, Ordering::SeqCst);
                    }
                }
                _ = shutdown.changed() => {
                    self.outstanding.fetch_sub(1, Ordering::SeqCst);
                    return;
                }
            }
        }
    }
}

/// Runs a complete crawl from a seed URL
///
/// Convenience entry point wrapping [`Coordinator`].
pub async fn crawl(config: Config, seed_url: &str) -> Result<CrawlSummary> {
    Coordinator::new(config, seed_url)?.run().await
}
