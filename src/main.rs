// src/main.rs
// =============================================================================
// This is the entry point of the crawler.
//
// What happens here:
// 1. Parse command-line arguments (all optional)
// 2. Set up logging
// 3. resume(): load the records earlier runs left in the output directory
// 4. crawl(seed): fetch everything new that is reachable from the seed
// 5. Print the final counts
//
// Exit codes:
//   0 = crawl completed (individual pages may still have failed; see logs)
//   2 = could not start (bad seed URL, output directory locked or unusable)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod extract;
mod fetch;
mod logging;
mod store;

use clap::Parser;
use cli::Cli;
use config::CrawlConfig;
use crawl::{CrawlStats, Crawler};
use serde::Serialize;

use anyhow::Result;

// Summary printed when the crawl finishes
#[derive(Debug, Serialize)]
struct CrawlReport {
    output_dir: String,
    /// Records recovered from earlier runs
    loaded: usize,
    #[serde(flatten)]
    stats: CrawlStats,
    /// Unique pages on disk after this run
    total_pages: usize,
    visited: usize,
}

// One request at a time, so a single-threaded runtime is all we need
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize_logging(&cli)?;

    let config = CrawlConfig::from_cli(&cli)?;
    let mut crawler = Crawler::new(config)?;
    let seed = crawler.config().seed.clone();

    let loaded = crawler.resume()?;
    if !cli.json {
        println!(
            "📂 Loaded {} previously scraped page(s) from {}",
            loaded,
            crawler.store().dir().display()
        );
        println!("🔍 Crawling from {}", seed);
    }

    let stats = crawler.crawl(&seed).await;

    let report = CrawlReport {
        output_dir: crawler.store().dir().display().to_string(),
        loaded,
        stats,
        total_pages: crawler.pages().len(),
        visited: crawler.frontier().visited_len(),
    };
    print_report(&report, cli.json)
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!();
    println!("📊 Summary:");
    println!("   📥 Fetched: {}", report.stats.fetched);
    println!("   ⏭️  Already on disk: {}", report.stats.skipped);
    println!("   ❌ Failed: {}", report.stats.failed);
    println!("   📋 Total unique pages scraped: {}", report.total_pages);
    Ok(())
}
