// src/extract/mod.rs
// =============================================================================
// This module turns a fetched HTML page into the two things the crawler needs.
//
// Submodules:
// - links: in-scope, fragment-stripped links to crawl next
// - text: the visible text that goes into the page record
//
// Both sit on top of the `scraper` crate. The crawler only calls the two
// functions re-exported below, so the parser could be swapped out without
// touching the crawl loop.
// =============================================================================

mod links;
mod text;

pub use links::{extract_links, strip_fragment};
pub use text::extract_visible_text;
