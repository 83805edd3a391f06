// src/crawl/crawler.rs
// =============================================================================
// This module implements the resumable breadth-first crawl.
//
// How it works:
// 1. resume(): load every record already on disk, mark those URLs visited
// 2. crawl(seed): put the seed at the head of the queue
// 3. Pop a URL; if its record is already on disk, skip the fetch and
//    re-expand the links stored in the record
// 4. Otherwise fetch it, extract text + links, persist the record right away
// 5. Enqueue in-scope links that are not visited, queued or dropped
// 6. Sleep for the politeness delay, repeat until the queue is empty
//
// Failure policy:
// - Any error on one URL (fetch, parse, io, bad record) is logged and the
//   URL is dropped for the rest of the run
// - Nothing is retried; nothing stops the loop except an empty queue
//
// Politeness:
// - One request in flight at a time
// - Fixed delay after every network request, taken once the page is saved
//
// Rust concepts:
// - &mut self: the crawler owns its frontier and pages, no globals
// - async fn: only fetch() and the delay actually wait on anything
// - Result + ?: per-URL errors bubble up to crawl(), which logs and moves on
// =============================================================================

use serde::Serialize;
use tracing::{debug, error, info, warn};
use url::Url;

use super::frontier::Frontier;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::extract::{extract_links, extract_visible_text, strip_fragment};
use crate::fetch::{FetchedPage, Fetcher};
use crate::store::{PageRecord, PageStore};

// Counters for one crawl() call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    // Pages fetched over the network and persisted
    pub fetched: usize,
    // URLs whose record was already on disk
    pub skipped: usize,
    // URLs dropped after an error
    pub failed: usize,
    // New URLs added to the queue
    pub enqueued: usize,
}

// What happened to one dequeued URL
enum Visit {
    Fetched,
    AlreadyPersisted,
}

pub struct Crawler {
    config: CrawlConfig,
    fetcher: Fetcher,
    store: PageStore,
    frontier: Frontier,
    // Recovered by resume() plus everything fetched since
    pages: Vec<PageRecord>,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        // Lock the output directory first: a second crawler fails here,
        // before it has made a single request
        let store = PageStore::open(&config.output_dir)?;
        let fetcher = Fetcher::new(config.timeout, &config.user_agent)?;

        Ok(Self {
            config,
            fetcher,
            store,
            frontier: Frontier::new(),
            pages: Vec::new(),
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    // Every page known to this run: recovered by resume() or fetched since
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    // Recovers the work of earlier runs from the output directory
    //
    // Returns the number of records loaded. Malformed records are logged
    // and skipped. Links stored in recovered records that were never
    // fetched go back on the queue, so an interrupted crawl picks up its
    // pending frontier too.
    pub fn resume(&mut self) -> Result<usize, CrawlError> {
        let mut recovered = Vec::new();

        // First pass: mark every readable record visited
        for entry in self.store.scan()? {
            match entry {
                Ok(record) => {
                    if self.frontier.mark_visited(&record.url) {
                        recovered.push(record);
                    }
                }
                // A bad file costs one page, never the whole scan
                Err(e) => warn!(error = %e, "skipping unreadable record"),
            }
        }

        // Second pass: every recovered URL must be visited before deciding
        // which stored links are still pending
        for record in &recovered {
            self.enqueue_stored_links(record);
        }

        let count = recovered.len();
        self.pages.extend(recovered);

        info!(
            recovered = count,
            pending = self.frontier.queue_len(),
            dir = %self.store.dir().display(),
            "resumed from previous runs"
        );
        Ok(count)
    }

    // Crawls everything reachable from `seed` inside the configured scope
    pub async fn crawl(&mut self, seed: &Url) -> CrawlStats {
        let mut stats = CrawlStats::default();

        // The seed is the entry point: no scope check, no visited check
        let seed = strip_fragment(seed.clone());
        self.frontier.push_seed(seed.as_str());

        // Process the queue until empty
        while let Some(url) = self.frontier.pop() {
            let before = self.frontier.queue_len();

            match self.visit(&url).await {
                Ok(Visit::Fetched) => stats.fetched += 1,
                Ok(Visit::AlreadyPersisted) => stats.skipped += 1,
                Err(e) => {
                    // One attempt per run: later links to this URL are ignored
                    stats.failed += 1;
                    self.frontier.mark_dropped(&url);
                    match &e {
                        CrawlError::Fetch { .. } => warn!(%url, error = %e, "dropping url"),
                        _ => error!(%url, error = %e, "dropping url"),
                    }
                }
            }

            stats.enqueued += self.frontier.queue_len().saturating_sub(before);
        }

        info!(
            visited = self.frontier.visited_len(),
            dropped = self.frontier.dropped_len(),
            fetched = stats.fetched,
            skipped = stats.skipped,
            failed = stats.failed,
            "crawl finished"
        );
        stats
    }

    async fn visit(&mut self, url: &str) -> Result<Visit, CrawlError> {
        // Already persisted by this or an earlier run: no network call,
        // just re-expand the links the record kept
        if let Some(record) = self.store.get(url)? {
            info!(%url, "already persisted, skipping fetch");
            if self.frontier.mark_visited(url) {
                self.pages.push(record.clone());
            }
            self.enqueue_stored_links(&record);
            return Ok(Visit::AlreadyPersisted);
        }

        let page_url = Url::parse(url).map_err(|source| CrawlError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        info!(%url, "visiting");
        let page = match self.fetcher.fetch(&page_url).await {
            Ok(page) => page,
            Err(source) => {
                // Failed requests still count against the server
                self.pause().await;
                return Err(CrawlError::Fetch {
                    url: url.to_string(),
                    source,
                });
            }
        };

        // Save and enqueue first, then sleep: a crash during the delay
        // must not lose a page that was already downloaded
        let result = self.record_page(url, &page_url, &page);
        self.pause().await;
        result.map(|()| Visit::Fetched)
    }

    // Turns a fetched page into a record, persists it and queues its links
    fn record_page(
        &mut self,
        url: &str,
        page_url: &Url,
        page: &FetchedPage,
    ) -> Result<(), CrawlError> {
        // PDFs, images and the like have no text or links we can use
        if !page.is_html() {
            return Err(CrawlError::Parse {
                url: url.to_string(),
                reason: format!(
                    "not an HTML document ({})",
                    page.content_type.as_deref().unwrap_or("unknown")
                ),
            });
        }

        // Extract everything before touching the disk
        let links = extract_links(&page.body, page_url, &self.config.scope)?;
        let record = PageRecord {
            url: url.to_string(),
            text: extract_visible_text(&page.body),
            links: links.iter().map(|link| link.to_string()).collect(),
        };

        // Persist immediately; the record is durable once save() returns
        if self.store.save(&record)? {
            info!(%url, path = %self.store.record_path(url).display(), "saved");
        } else {
            warn!(%url, "record appeared on disk while fetching, keeping existing file");
        }
        self.frontier.mark_visited(url);

        // Queue the links nobody has seen yet (enqueue() does the filtering)
        let mut new_links = 0;
        for link in &links {
            if self.frontier.enqueue(link.as_str()) {
                new_links += 1;
            }
        }
        debug!(
            %url,
            found = links.len(),
            new = new_links,
            queued = self.frontier.queue_len(),
            "links"
        );

        self.pages.push(record);
        Ok(())
    }

    // Re-applies the current scope to links saved in a record and queues
    // the ones not seen yet. No network access.
    fn enqueue_stored_links(&mut self, record: &PageRecord) {
        for raw in &record.links {
            // Records are plain JSON on disk; someone may have edited one
            let Ok(link) = Url::parse(raw) else {
                warn!(url = %record.url, link = %raw, "ignoring unparseable stored link");
                continue;
            };
            let link = strip_fragment(link);
            // The scope may have changed since the record was written
            if self.config.scope.accepts(&link) {
                self.frontier.enqueue(link.as_str());
            }
        }
    }

    // Polite crawling: fixed delay between requests
    async fn pause(&self) {
        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }
    }
}
