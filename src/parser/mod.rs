// src/parser/mod.rs
// =============================================================================
// The fetch/parse collaborator used by the crawl engine.
//
// The engine only knows the PageParser trait: give it a URL, get back the
// words on that page and the links it points to. How the page is fetched
// (HTTP, local file, an in-memory test graph) is up to the implementation.
//
// Submodules:
// - http: the bundled implementation (reqwest for http/https, disk for file:)
// - html: turns an HTML document into word counts and absolute links
// =============================================================================

mod html;
mod http;

#[cfg(test)]
pub mod fake;

use anyhow::Result;
use futures::future::BoxFuture;
use std::collections::HashMap;

pub use http::HttpPageParser;

/// What a single page contributes to the crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Occurrences of each word on this page only.
    pub word_counts: HashMap<String, usize>,
    /// Absolute URLs of the outgoing links, in document order.
    pub links: Vec<String>,
}

/// Fetches and parses one page.
///
/// Implementations are shared by every worker thread, so they must be safe to
/// call concurrently. An `Err` means this URL could not be processed; the
/// crawl keeps going without it.
pub trait PageParser: Send + Sync {
    fn parse<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ParsedPage>>;
}
