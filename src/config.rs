// src/config.rs
// =============================================================================
// Crawl configuration: the JSON file on disk and the validated value the
// crawler runs with.
//
// Example file:
//   {
//     "startPages": ["https://example.com/"],
//     "ignoredUrls": ["https://example\\.com/private/.*"],
//     "ignoredWords": ["^.{1,3}$"],
//     "parallelism": 4,
//     "maxDepth": 3,
//     "timeoutSeconds": 10,
//     "popularWordCount": 5,
//     "resultPath": "result.json"
//   }
//
// Numbers are read as signed integers so that a negative depth or timeout is
// reported as a configuration error instead of a JSON type error. Every
// check runs before any crawling starts.
// =============================================================================

use crate::crawl::Clock;
use crate::parser::PageParser;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("maxDepth must be at least 0, got {0}")]
    NegativeMaxDepth(i64),

    #[error("timeoutSeconds must be at least 0, got {0}")]
    NegativeTimeout(i64),

    #[error("popularWordCount must be at least 0, got {0}")]
    NegativePopularWordCount(i64),

    #[error("parallelism must be at least 1, got {0}")]
    InvalidParallelism(i64),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A regular expression that must match the whole input, not a substring.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

/// The configuration file as written by the user (camelCase keys).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFile {
    pub start_pages: Vec<String>,
    pub ignored_urls: Vec<String>,
    pub ignored_words: Vec<String>,
    pub parallelism: Option<i64>,
    pub max_depth: i64,
    pub timeout_seconds: i64,
    pub popular_word_count: i64,
    pub result_path: Option<String>,
}

/// Everything one crawl needs. Immutable once built.
pub struct CrawlConfig {
    pub timeout: Duration,
    pub max_depth: usize,
    pub popular_word_count: usize,
    /// Requested worker count; capped at hardware concurrency by the crawler.
    pub parallelism: usize,
    pub ignored_urls: Vec<Pattern>,
    pub clock: Arc<dyn Clock>,
    pub parser: Arc<dyn PageParser>,
}

/// Reads and parses a config file. Values are validated later by
/// [`ConfigFile::crawl_config`].
pub fn load(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ConfigFile::from_json(&text)
}

impl ConfigFile {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Compiles `ignoredWords` for the page parser.
    pub fn ignored_word_patterns(&self) -> Result<Vec<Pattern>, ConfigError> {
        compile_all(&self.ignored_words)
    }

    /// Where to write the result, if anywhere. An empty string means stdout.
    pub fn result_path(&self) -> Option<PathBuf> {
        self.result_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    /// Validates the numeric settings and URL patterns and builds the value
    /// the crawler runs with.
    pub fn crawl_config(
        &self,
        clock: Arc<dyn Clock>,
        parser: Arc<dyn PageParser>,
    ) -> Result<CrawlConfig, ConfigError> {
        let max_depth = usize::try_from(self.max_depth)
            .map_err(|_| ConfigError::NegativeMaxDepth(self.max_depth))?;
        let timeout_seconds = u64::try_from(self.timeout_seconds)
            .map_err(|_| ConfigError::NegativeTimeout(self.timeout_seconds))?;
        let popular_word_count = usize::try_from(self.popular_word_count)
            .map_err(|_| ConfigError::NegativePopularWordCount(self.popular_word_count))?;

        let parallelism = match self.parallelism {
            None => num_cpus::get(),
            Some(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
            Some(n) => return Err(ConfigError::InvalidParallelism(n)),
        };

        Ok(CrawlConfig {
            timeout: Duration::from_secs(timeout_seconds),
            max_depth,
            popular_word_count,
            parallelism,
            ignored_urls: compile_all(&self.ignored_urls)?,
            clock,
            parser,
        })
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns.iter().map(|p| Pattern::new(p)).collect()
}
