// src/crawl/coordinator.rs
// =============================================================================
// Entry point of the crawl engine.
//
// ParallelCrawler owns the worker pool for its whole lifetime. Each call to
// crawl() gets its own visited set and word counts, so two crawls never see
// each other's state.
// =============================================================================

use crate::config::CrawlConfig;
use crate::crawl::rank::rank;
use crate::crawl::task::{CrawlContext, CrawlTask};
use crate::crawl::CrawlState;
use crate::result::CrawlResult;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::Semaphore;
use tracing::{info, warn};

// Stand-in deadline for timeouts too large to add to an Instant
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

pub struct ParallelCrawler {
    config: CrawlConfig,
    parallelism: usize,
    runtime: Runtime,
}

impl ParallelCrawler {
    /// Builds the worker pool with min(configured, hardware) threads.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let parallelism = config.parallelism.min(Self::max_parallelism()).max(1);

        let runtime = Builder::new_multi_thread()
            .worker_threads(parallelism)
            .thread_name("crawl-worker")
            .enable_all()
            .build()
            .context("failed to start crawl worker pool")?;

        Ok(Self {
            config,
            parallelism,
            runtime,
        })
    }

    /// Hardware concurrency available to this process. Always at least 1.
    pub fn max_parallelism() -> usize {
        num_cpus::get().max(1)
    }

    /// Number of workers actually in the pool.
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Crawls from each starting URL in turn and ranks the words found.
    ///
    /// Starting URLs are not deduplicated here; a repeated one is simply
    /// skipped by the visited check. Blocks until every spawned task is done.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a tokio runtime, since it blocks on the
    /// crawler's own runtime. For the same reason a `ParallelCrawler` must not
    /// be dropped from async code.
    pub fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        let config = &self.config;
        let now = config.clock.now();
        let deadline = now
            .checked_add(config.timeout)
            .unwrap_or_else(|| now + FAR_FUTURE);

        let state = Arc::new(CrawlState::new());
        let context = Arc::new(CrawlContext {
            deadline,
            state: Arc::clone(&state),
            ignored_urls: config.ignored_urls.clone(),
            parser: Arc::clone(&config.parser),
            clock: Arc::clone(&config.clock),
            permits: Arc::new(Semaphore::new(self.parallelism)),
        });

        info!(
            starting_urls = starting_urls.len(),
            max_depth = config.max_depth,
            parallelism = self.parallelism,
            timeout_secs = config.timeout.as_secs(),
            "starting crawl"
        );

        self.runtime.block_on(async {
            for url in starting_urls {
                let root = CrawlTask::new(url.clone(), config.max_depth, Arc::clone(&context));
                if let Err(e) = tokio::spawn(root.run()).await {
                    warn!(url = %url, error = %e, "crawl from starting URL failed");
                }
            }
        });

        let urls_visited = state.visited_count();
        let word_counts = if state.has_counts() {
            rank(&state.snapshot_counts(), config.popular_word_count)
        } else {
            Vec::new()
        };

        info!(urls_visited, distinct_words = word_counts.len(), "crawl finished");

        CrawlResult {
            word_counts,
            urls_visited,
        }
    }
}
