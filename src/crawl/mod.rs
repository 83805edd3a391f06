// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Scope predicate (scheme + domain + base prefix) on every followed link
// - Every page persisted as soon as it is fetched
// - Restartable: records already on disk are never fetched again
// - Polite crawling with a fixed delay between requests
//
// Submodules:
// - scope: which links may be followed
// - frontier: visited set + FIFO queue
// - crawler: the fetch / extract / persist / enqueue loop
// =============================================================================

mod crawler;
mod frontier;
mod scope;

pub use crawler::{CrawlStats, Crawler};
pub use frontier::Frontier;
pub use scope::ScopePredicate;
