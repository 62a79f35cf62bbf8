// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Most settings live in the JSON config file; the flags here only override
// where the result goes and how many workers to use.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "word-crawler",
    version,
    about = "Crawl a set of web pages in parallel and rank the most popular words",
    long_about = "word-crawler follows links from the configured start pages up to a maximum depth \
                  and timeout, counting every word it sees. The most popular words and the number \
                  of pages visited are written out as JSON."
)]
pub struct Cli {
    /// Path to the JSON crawl configuration
    ///
    /// Example: word-crawler crawl.json
    pub config: PathBuf,

    /// Write the JSON result to this file
    ///
    /// Overrides "resultPath" from the config. Without either, the result is
    /// printed to stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Override the configured number of worker threads
    ///
    /// Still capped at the number of CPUs available.
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub parallelism: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_only() {
        let cli = Cli::try_parse_from(["word-crawler", "crawl.json"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("crawl.json"));
        assert!(cli.output.is_none());
        assert!(cli.parallelism.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "word-crawler",
            "crawl.json",
            "-o",
            "out.json",
            "--parallelism",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.parallelism, Some(3));
    }

    #[test]
    fn test_zero_parallelism_rejected() {
        assert!(Cli::try_parse_from(["word-crawler", "crawl.json", "--parallelism", "0"]).is_err());
    }

    #[test]
    fn test_config_is_required() {
        assert!(Cli::try_parse_from(["word-crawler"]).is_err());
    }
}
