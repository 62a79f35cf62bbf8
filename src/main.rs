// src/main.rs
// =============================================================================
// Entry point of the word-crawler CLI.
//
// What happens here:
// 1. Set up logging (stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments and load the JSON config
// 3. Build the page parser and the crawler, run the crawl
// 4. Write the result as JSON to a file or stdout
// 5. Exit with 0 on success, 2 on any configuration or I/O error
//
// main is synchronous: the crawler owns its own tokio runtime (the worker
// pool), and a runtime cannot be started from inside another one.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod parser;
mod result;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use crawl::{ParallelCrawler, SystemClock};
use parser::HttpPageParser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_crawler=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run() {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let file = config::load(&cli.config)?;
    let parser = HttpPageParser::new(file.ignored_word_patterns()?)?;

    let mut crawl_config = file.crawl_config(Arc::new(SystemClock), Arc::new(parser))?;
    if let Some(parallelism) = cli.parallelism {
        crawl_config.parallelism = usize::from(parallelism);
    }

    let crawler = ParallelCrawler::new(crawl_config)?;
    info!(
        workers = crawler.parallelism(),
        cpus = ParallelCrawler::max_parallelism(),
        "crawler ready"
    );

    let result = crawler.crawl(&file.start_pages);

    match cli.output.or_else(|| file.result_path()) {
        Some(path) => {
            result.write_to_path(&path)?;
            info!(path = %path.display(), "result written");
        }
        None => result.write_json(std::io::stdout().lock())?,
    }

    Ok(())
}
