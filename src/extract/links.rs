// src/extract/links.rs
// =============================================================================
// This module extracts crawlable links from an HTML page.
//
// For every <a href="..."> in the document:
// 1. Resolve the href against the page's own URL (handles relative links)
// 2. Drop the #fragment (page#a and page#b are the same page)
// 3. Keep it only if the scope predicate accepts it
//
// Links come back in document order with duplicates removed, so the crawler
// enqueues them in the order a reader would meet them.
// =============================================================================

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::crawl::ScopePredicate;
use crate::error::CrawlError;

pub fn extract_links(
    html: &str,
    page_url: &Url,
    scope: &ScopePredicate,
) -> Result<Vec<Url>, CrawlError> {
    let document = Html::parse_document(html);
    let selector = anchor_selector(page_url)?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(link) = resolve_link(page_url, href) else {
            continue;
        };
        if scope.accepts(&link) && seen.insert(link.as_str().to_string()) {
            links.push(link);
        }
    }

    Ok(links)
}

// Strips the fragment from a URL: "page#section" -> "page"
pub fn strip_fragment(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

// Resolves a (possibly relative) href against the page URL
//
// Examples with base "https://example.com/docs/page":
//   "/about"      -> https://example.com/about
//   "../other"    -> https://example.com/other
//   "next#part-2" -> https://example.com/docs/next
//   "mailto:x@y"  -> mailto:x@y (rejected later by the scope predicate)
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok().map(strip_fragment)
}

fn anchor_selector(page_url: &Url) -> Result<Selector, CrawlError> {
    Selector::parse("a[href]").map_err(|e| CrawlError::Parse {
        url: page_url.to_string(),
        reason: format!("invalid anchor selector: {e}"),
    })
}
