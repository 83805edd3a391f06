// src/crawl/frontier.rs
// =============================================================================
// The crawl frontier: what has been visited and what is waiting to be.
//
// - visited: URLs fetched (or found already persisted) in this run.
//   Only ever grows.
// - queue: URLs waiting to be fetched, FIFO, which makes the crawl
//   breadth-first.
// - dropped: URLs that failed in this run. They get one attempt only.
//
// A URL is never enqueued twice, and never enqueued once visited or
// dropped. The queue is mirrored by a HashSet so "is it already queued?"
// stays O(1) even on large sites.
// =============================================================================

use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct Frontier {
    visited: HashSet<String>,
    queue: VecDeque<String>,
    queued: HashSet<String>,
    dropped: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    // Puts the seed at the head of the queue, unfiltered
    //
    // The seed is the crawl's entry point, so it is pushed even if it was
    // visited in an earlier run; the crawler then finds its record on disk
    // and expands its stored links instead of fetching it.
    pub fn push_seed(&mut self, url: &str) {
        if self.queued.contains(url) {
            self.queue.retain(|queued| queued != url);
        } else {
            self.queued.insert(url.to_string());
        }
        self.queue.push_front(url.to_string());
    }

    // Adds a URL to the tail of the queue unless it is already visited or
    // already waiting. Returns whether it was added.
    pub fn enqueue(&mut self, url: &str) -> bool {
        if self.visited.contains(url)
            || self.queued.contains(url)
            || self.dropped.contains(url)
        {
            return false;
        }
        self.queued.insert(url.to_string());
        self.queue.push_back(url.to_string());
        true
    }

    pub fn pop(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    // A failed URL is given up on for the rest of the run, even if
    // another page links to it later
    pub fn mark_dropped(&mut self, url: &str) -> bool {
        self.dropped.insert(url.to_string())
    }

    pub fn is_dropped(&self, url: &str) -> bool {
        self.dropped.contains(url)
    }

    #[cfg(test)]
    pub fn is_queued(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn dropped_len(&self) -> usize {
        self.dropped.len()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a second HashSet next to the VecDeque?
//    - VecDeque::contains is a linear scan
//    - The crawler asks "already queued?" for every link on every page
//    - `queued` answers in O(1); pop() and enqueue() keep the two in sync
//
// 2. Why does push_seed use push_front?
//    - resume() may already have queued links from records on disk
//    - The seed still goes first, so a fresh crawl order is seed, then its
//      links, then theirs (breadth-first)
// -----------------------------------------------------------------------------
