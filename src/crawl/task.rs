// src/crawl/task.rs
// =============================================================================
// The recursive crawl task: one URL plus everything reachable from it.
//
// How it works:
// 0. Wait for a fetch slot (one of `parallelism` permits)
// 1. Stop if there is no depth left, the deadline has passed, the URL is
//    ignored, or someone already visited it
// 2. Claim the URL in the shared visited set (only one task can win)
// 3. Fetch and parse the page, add its words to the shared counts
// 4. Spawn one child task per outgoing link (depth - 1) onto the worker pool
//    and wait for all of them
//
// Children are spawned with tokio::spawn rather than awaited in place, so an
// idle worker thread can steal them. A task is finished only once its whole
// subtree is.
// =============================================================================

use crate::config::Pattern;
use crate::crawl::{Clock, CrawlState};
use crate::parser::{PageParser, ParsedPage};
use futures::future::{join_all, BoxFuture};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Everything shared by all tasks of one crawl invocation.
pub struct CrawlContext {
    pub deadline: Instant,
    pub state: Arc<CrawlState>,
    pub ignored_urls: Vec<Pattern>,
    pub parser: Arc<dyn PageParser>,
    pub clock: Arc<dyn Clock>,
    /// Bounds how many pages are being fetched/parsed at the same moment.
    pub permits: Arc<Semaphore>,
}

/// Why a task ended without fetching its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    DepthExhausted,
    DeadlinePassed,
    Ignored,
    AlreadyVisited,
}

pub struct CrawlTask {
    url: String,
    remaining_depth: usize,
    context: Arc<CrawlContext>,
}

impl CrawlTask {
    pub fn new(url: String, remaining_depth: usize, context: Arc<CrawlContext>) -> Self {
        Self {
            url,
            remaining_depth,
            context,
        }
    }

    // Only called after the depth check passed, so remaining_depth >= 1
    fn child(&self, url: String) -> Self {
        Self::new(url, self.remaining_depth - 1, Arc::clone(&self.context))
    }

    /// Runs this task and its whole subtree.
    ///
    /// Boxed because the future is recursive (a task's future spawns the
    /// futures of its children).
    pub fn run(self) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            let Some(page) = self.visit().await else {
                return;
            };

            let children: Vec<_> = page
                .links
                .into_iter()
                .map(|link| tokio::spawn(self.child(link).run()))
                .collect();

            for outcome in join_all(children).await {
                if let Err(e) = outcome {
                    // A panicking child only loses its own subtree
                    warn!(parent = %self.url, error = %e, "crawl task failed");
                }
            }
        })
    }

    /// Checks the cheap stop conditions, in order. Does not claim the URL.
    pub fn should_skip(&self) -> Option<Skip> {
        let ctx = &self.context;

        if self.remaining_depth == 0 {
            return Some(Skip::DepthExhausted);
        }
        if ctx.clock.now() >= ctx.deadline {
            return Some(Skip::DeadlinePassed);
        }
        if ctx.ignored_urls.iter().any(|p| p.matches(&self.url)) {
            return Some(Skip::Ignored);
        }
        if ctx.state.is_visited(&self.url) {
            return Some(Skip::AlreadyVisited);
        }
        None
    }

    // Claims, fetches and merges this task's page. Returns None when the task
    // should not fan out.
    //
    // The permit is taken before the stop checks, so the deadline is read
    // when a worker slot is actually free, not when the task was spawned.
    async fn visit(&self) -> Option<ParsedPage> {
        let ctx = &self.context;
        let _permit = ctx.permits.acquire().await.ok()?;

        if let Some(reason) = self.should_skip() {
            debug!(url = %self.url, ?reason, "skipping");
            return None;
        }
        if !ctx.state.try_claim(&self.url) {
            debug!(url = %self.url, reason = ?Skip::AlreadyVisited, "lost claim race");
            return None;
        }

        debug!(url = %self.url, depth = self.remaining_depth, "fetching");
        let page = match ctx.parser.parse(&self.url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %self.url, error = %format!("{:#}", e), "fetch failed, counting page as empty");
                ParsedPage::default()
            }
        };

        for (word, count) in &page.word_counts {
            ctx.state.merge(word, *count);
        }

        Some(page)
    }
}
