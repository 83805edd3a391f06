// src/config.rs
// =============================================================================
// Crawl settings.
//
// Everything has a default, so running the binary with no flags crawls the
// BU research support pages into ./scraped_pages. The CLI can override any
// of it (see cli.rs).
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::cli::Cli;
use crate::crawl::ScopePredicate;
use crate::error::CrawlError;

pub const DEFAULT_SEED: &str = "https://www.bu.edu/tech/support/research/";
pub const DEFAULT_DOMAIN: &str = "bu.edu";
pub const DEFAULT_OUTPUT_DIR: &str = "scraped_pages";
pub const DEFAULT_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("page-harvester/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: Url,
    pub scope: ScopePredicate,
    pub output_dir: PathBuf,
    /// Fixed pause after every network request
    pub delay: Duration,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl CrawlConfig {
    // Default settings for crawling everything under `seed`
    //
    // The scope is the seed's host and the seed itself as the base prefix.
    pub fn new(seed: Url, output_dir: impl Into<PathBuf>) -> Self {
        let domain = seed.host_str().unwrap_or_default().to_string();
        let scope = ScopePredicate::new(domain, seed.as_str());

        Self {
            seed,
            scope,
            output_dir: output_dir.into(),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, CrawlError> {
        let seed = parse_url(&cli.seed)?;
        let base_prefix = match &cli.base_prefix {
            Some(prefix) => prefix.clone(),
            None => seed.to_string(),
        };

        Ok(Self {
            scope: ScopePredicate::new(cli.domain.as_str(), base_prefix),
            seed,
            output_dir: cli.output_dir.clone(),
            delay: Duration::from_millis(cli.delay_ms),
            timeout: Duration::from_secs(cli.timeout_secs),
            user_agent: cli.user_agent.clone(),
        })
    }
}

// Parses a URL and drops its fragment, the canonical form used as a record key
pub fn parse_url(raw: &str) -> Result<Url, CrawlError> {
    let mut url = Url::parse(raw.trim()).map_err(|source| CrawlError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_from_empty_command_line() {
        let cli = Cli::parse_from(["page-harvester"]);
        let config = CrawlConfig::from_cli(&cli).unwrap();

        assert_eq!(config.seed.as_str(), DEFAULT_SEED);
        assert_eq!(config.scope.domain(), DEFAULT_DOMAIN);
        assert_eq!(config.scope.base_prefix(), DEFAULT_SEED);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.delay, Duration::from_millis(500));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "page-harvester",
            "--seed",
            "https://docs.example.org/guide/#intro",
            "--domain",
            "example.org",
            "--base-prefix",
            "https://docs.example.org/",
            "--delay-ms",
            "0",
        ]);
        let config = CrawlConfig::from_cli(&cli).unwrap();

        assert_eq!(config.seed.as_str(), "https://docs.example.org/guide/");
        assert_eq!(config.scope.base_prefix(), "https://docs.example.org/");
        assert_eq!(config.delay, Duration::ZERO);
    }

    #[test]
    fn test_invalid_seed() {
        let cli = Cli::parse_from(["page-harvester", "--seed", "not a url"]);
        let err = CrawlConfig::from_cli(&cli).unwrap_err();
        assert!(matches!(err, CrawlError::InvalidUrl { .. }));
    }

    #[test]
    fn test_new_scopes_to_seed() {
        let seed = Url::parse("http://127.0.0.1:4000/docs/").unwrap();
        let config = CrawlConfig::new(seed, "out");
        assert_eq!(config.scope.domain(), "127.0.0.1");
        assert_eq!(config.scope.base_prefix(), "http://127.0.0.1:4000/docs/");
    }
}
