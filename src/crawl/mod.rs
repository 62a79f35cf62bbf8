// src/crawl/mod.rs
// =============================================================================
// The parallel crawl engine.
//
// Features:
// - Recursive depth-first fan-out over the link graph
// - Work-stealing worker pool (tokio multi-threaded runtime)
// - Each URL fetched at most once per crawl
// - Cooperative deadline: no new work starts once it has passed
// - Word counts aggregated across all pages and ranked at the end
//
// Submodules, leaves first:
// - clock: time source for the deadline
// - state: concurrent visited set and word counts
// - rank: top-N ordering of the final counts
// - task: the recursive unit of work
// - coordinator: owns the pool and runs a whole crawl
// =============================================================================

mod clock;
mod coordinator;
mod rank;
mod state;
mod task;

pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::FakeClock;
pub use coordinator::ParallelCrawler;
pub use state::CrawlState;
