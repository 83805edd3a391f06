// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every flag has a default, so `page-harvester` on its own resumes from
// ./scraped_pages and crawls the BU research support pages. The flags exist
// to point the same crawler at another site or directory.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    DEFAULT_DELAY_MS, DEFAULT_DOMAIN, DEFAULT_OUTPUT_DIR, DEFAULT_SEED, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};

#[derive(Parser, Debug)]
#[command(
    name = "page-harvester",
    version,
    about = "Crawl a site breadth-first and save each page's visible text as JSON",
    long_about = "page-harvester crawls every page reachable from a seed URL within a domain and \
                  URL prefix, saving each page's visible text to <sha256-of-url>.json. \
                  Re-running it resumes from the records already on disk."
)]
pub struct Cli {
    /// URL the crawl starts from
    #[arg(long, default_value = DEFAULT_SEED)]
    pub seed: String,

    /// Only follow links whose host is this domain or a subdomain of it
    #[arg(long, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Only follow links starting with this prefix (defaults to the seed)
    #[arg(long)]
    pub base_prefix: Option<String>,

    /// Directory holding one JSON record per page
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Pause after each request, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Print the final report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Debug-level logging (link counts per page)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_needed() {
        let cli = Cli::parse_from(["page-harvester"]);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert!(cli.base_prefix.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["page-harvester", "-v", "-q"]);
        assert!(result.is_err());
    }
}
