// src/parser/fake.rs
// In-memory link graph used by the crawl tests. Records how often each URL
// was fetched and how many fetches were in flight at once.

use crate::crawl::FakeClock;
use crate::parser::{PageParser, ParsedPage};
use anyhow::{anyhow, Result};
use dashmap::DashMap;
use futures::future::BoxFuture;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
pub struct FakePageParser {
    pages: HashMap<String, ParsedPage>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    delay: Option<Duration>,
    advance: Option<(Arc<FakeClock>, Duration)>,
    fetches: DashMap<String, usize>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakePageParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page. URLs never registered parse as empty pages.
    pub fn page(mut self, url: &str, words: &[(&str, usize)], links: &[&str]) -> Self {
        let page = ParsedPage {
            word_counts: words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
            links: links.iter().map(|l| l.to_string()).collect(),
        };
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn panicking(mut self, url: &str) -> Self {
        self.panicking.insert(url.to_string());
        self
    }

    /// Each fetch sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Each fetch moves `clock` forward by `by`.
    pub fn advancing(mut self, clock: Arc<FakeClock>, by: Duration) -> Self {
        self.advance = Some((clock, by));
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches.get(url).map(|n| *n).unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.iter().map(|entry| *entry.value()).sum()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl PageParser for FakePageParser {
    fn parse<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ParsedPage>> {
        Box::pin(async move {
            *self.fetches.entry(url.to_string()).or_insert(0) += 1;

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if let Some((clock, by)) = &self.advance {
                clock.advance(*by);
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.panicking.contains(url) {
                panic!("parser blew up on {}", url);
            }
            if self.failing.contains(url) {
                return Err(anyhow!("connection refused: {}", url));
            }
            Ok(self.pages.get(url).cloned().unwrap_or_default())
        })
    }
}
