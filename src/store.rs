// src/store.rs
// =============================================================================
// On-disk page records.
//
// Layout: one flat directory, one file per page, named after the SHA-256 of
// the page URL:
//
//   scraped_pages/
//     .lock
//     3f1c...e9.json   {"url": "...", "text": "...", "links": [...]}
//     a04b...17.json
//
// The directory is the crawl's only durable state. A record is written
// atomically (temp file + no-clobber rename) before the crawler moves on, so
// an interrupted run never leaves a half-written record behind.
//
// Only one crawler may use a directory at a time: PageStore::open takes an
// exclusive lock on `.lock` and holds it until the store is dropped.
//
// Rust concepts:
// - serde derive: PageRecord <-> JSON with no hand-written parsing
// - RAII: the lock lives in a struct field and is released on drop
// - Result<Option<T>>: "no record" is not an error, a broken one is
// =============================================================================

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::CrawlError;

const LOCK_FILE: &str = ".lock";

// One successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    // Fragment-stripped URL that was fetched
    pub url: String,
    // Visible text, one non-blank line per line
    pub text: String,
    // In-scope links found on the page, so a resumed crawl can keep
    // expanding from this page without fetching it again.
    // Older records without this key load with an empty list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

// "<hex sha256 of url>.json"
pub fn record_file_name(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    format!("{:x}.json", digest)
}

#[derive(Debug)]
pub struct PageStore {
    dir: PathBuf,
    // Held for the lifetime of the store; dropping it releases the lock
    _lock: File,
}

impl PageStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CrawlError> {
        let dir = dir.into();

        // First run: the directory does not exist yet
        fs::create_dir_all(&dir).map_err(|e| CrawlError::io(&dir, e))?;

        // The lock file itself stays empty; only the flock on it matters
        let lock_path = dir.join(LOCK_FILE);
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| CrawlError::io(&lock_path, e))?;

        // Don't wait for the other crawler, refuse to start
        if lock.try_lock_exclusive().is_err() {
            return Err(CrawlError::StoreLocked { dir });
        }

        Ok(Self { dir, _lock: lock })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, url: &str) -> PathBuf {
        self.dir.join(record_file_name(url))
    }

    // Reads the record for `url`, if one was persisted
    pub fn get(&self, url: &str) -> Result<Option<PageRecord>, CrawlError> {
        let path = self.record_path(url);
        if !path.is_file() {
            return Ok(None);
        }
        read_record(&path).map(Some)
    }

    // Persists a record. Returns false when a record for the URL already
    // existed; the existing file is left untouched.
    pub fn save(&self, record: &PageRecord) -> Result<bool, CrawlError> {
        let path = self.record_path(&record.url);
        // Pretty JSON; serde_json keeps non-ASCII text as-is
        let json = serde_json::to_string_pretty(record)?;

        // Write + fsync a temp file in the same directory, so the rename
        // below stays on one filesystem and is atomic
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| CrawlError::io(&self.dir, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| CrawlError::io(tmp.path(), e))?;

        // Rename into place, unless a record is already there
        match tmp.persist_noclobber(&path) {
            Ok(_) => Ok(true),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(CrawlError::io(&path, e.error)),
        }
    }

    // Loads every `*.json` record in the directory, sorted by file name.
    // Each entry is loaded independently; one bad file does not hide the rest.
    pub fn scan(&self) -> Result<Vec<Result<PageRecord, CrawlError>>, CrawlError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| CrawlError::io(&self.dir, e))?;

        // Only *.json files are records (skips .lock and temp files)
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CrawlError::io(&self.dir, e))?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") && path.is_file() {
                paths.push(path);
            }
        }
        // Deterministic order, so resume() queues pending links the same
        // way every time
        paths.sort();

        Ok(paths.iter().map(|path| read_record(path)).collect())
    }
}

// Unreadable file and bad JSON both count as a malformed record
fn read_record(path: &Path) -> Result<PageRecord, CrawlError> {
    let raw = fs::read_to_string(path).map_err(|e| CrawlError::MalformedRecord {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&raw).map_err(|e| CrawlError::MalformedRecord {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
