// src/logging.rs
// =============================================================================
// Sets up `tracing` output for the crawl.
//
// Logs go to stderr so stdout only carries the final report (which may be
// JSON). Level: INFO by default, DEBUG with -v, WARN with -q.
// =============================================================================

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn log_level(cli: &Cli) -> Level {
    if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_levels() {
        assert_eq!(log_level(&Cli::parse_from(["page-harvester"])), Level::INFO);
        assert_eq!(log_level(&Cli::parse_from(["page-harvester", "-v"])), Level::DEBUG);
        assert_eq!(log_level(&Cli::parse_from(["page-harvester", "-q"])), Level::WARN);
    }
}
