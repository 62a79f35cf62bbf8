// src/result.rs
// =============================================================================
// The output of a crawl and how it is written out.
//
// JSON shape:
//   {
//     "wordCounts": { "crawler": 12, "rust": 9, ... },
//     "urlsVisited": 7
//   }
//
// wordCounts keys appear in rank order, so the object is written by hand
// with serialize_map instead of going through a HashMap.
// =============================================================================

use anyhow::{Context, Result};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    /// At most `popularWordCount` entries, most popular first.
    pub word_counts: Vec<(String, usize)>,
    /// Distinct URLs claimed during the crawl.
    pub urls_visited: usize,
}

struct RankedWords<'a>(&'a [(String, usize)]);

impl Serialize for RankedWords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlResult", 2)?;
        state.serialize_field("wordCounts", &RankedWords(&self.word_counts))?;
        state.serialize_field("urlsVisited", &self.urls_visited)?;
        state.end()
    }
}

impl CrawlResult {
    /// Writes pretty-printed JSON followed by a newline.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Creates (or truncates) `path` and writes the JSON into it.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("could not create result file {}", path.display()))?;
        self.write_json(BufWriter::new(file))
            .with_context(|| format!("could not write result file {}", path.display()))
    }
}
