// src/parser/html.rs
// =============================================================================
// Extracts words and links from an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Words come from the visible text of <body> (script/style contents are
// skipped). Each whitespace-separated token is stripped of anything that is
// not a letter or digit and lowercased.
//
// Links come from every <a href>, resolved against the page URL with the
// `url` crate, fragments removed.
// =============================================================================

use crate::config::Pattern;
use crate::parser::ParsedPage;
use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use url::Url;

// Elements whose text content is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parses `html` fetched from `page_url` into word counts and links.
pub fn parse_page(html: &str, page_url: &Url, ignored_words: &[Pattern]) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        word_counts: count_words(&visible_text(&document), ignored_words),
        links: extract_links(&document, page_url),
    }
}

// Collects the text nodes under <body>, or under the whole document when the
// page has no body element
fn visible_text(document: &Html) -> String {
    // Constant selector, known to be valid
    let body = Selector::parse("body").expect("valid selector");
    let root = document
        .select(&body)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    for node in root.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name()))
            .is_some_and(|name| HIDDEN_ELEMENTS.contains(&name));

        if !hidden {
            text.push_str(fragment);
            text.push(' ');
        }
    }
    text
}

fn count_words(text: &str, ignored_words: &[Pattern]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();

    for token in text.split_whitespace() {
        let word: String = token
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        if word.is_empty() || ignored_words.iter().any(|p| p.matches(&word)) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}

fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    let selector = Selector::parse("a[href]").expect("valid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(base, href))
        .collect()
}

// Resolves a possibly-relative href to an absolute, crawlable URL
//
// Examples (base = "https://example.com/page"):
//   "/docs"              -> Some("https://example.com/docs")
//   "other#section"      -> Some("https://example.com/other")
//   "#section"           -> None (same page)
//   "mailto:a@b.com"     -> None
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    url.set_fragment(None);

    if is_crawlable(&url) {
        Some(url.to_string())
    } else {
        None
    }
}

fn is_crawlable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https" | "file")
}
