// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// Every failure carries the URL or path it happened on, so a single log line
// is enough to know which page was dropped and why.
//
// The crawl loop never lets one of these escape: a failed URL is logged and
// the next one is processed. Only startup (bad seed, locked store) can fail
// a whole run.
// =============================================================================

use std::path::PathBuf;

// Why a single fetch failed
//
// Mirrors the way link checkers bucket reqwest failures: status codes first,
// then timeouts, then connection problems, then everything else.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),

    /// Request did not finish within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Could not connect (DNS, refused, TLS handshake)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Anything else reqwest reported (body decode, redirect loop, ...)
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else if let Some(status) = error.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Other(error.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Network timeout, connection failure or non-2xx status
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// On-disk record is unreadable or missing `url` / `text`
    #[error("malformed record {}: {reason}", path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    /// The response is not an HTML document, or its links could not be read
    #[error("failed to parse {url}: {reason}")]
    Parse { url: String, reason: String },

    /// A URL that could not be parsed at all
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Another crawler already holds the output directory
    #[error("output directory {} is locked by another crawl", dir.display())]
    StoreLocked { dir: PathBuf },
}

impl CrawlError {
    // Shorthand used all over the store module
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrawlError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP 404");
        assert_eq!(FetchError::Timeout.to_string(), "request timed out");
    }

    #[test]
    fn test_crawl_error_names_the_url() {
        let err = CrawlError::Fetch {
            url: "https://example.com/a".to_string(),
            source: FetchError::Status(503),
        };
        assert_eq!(err.to_string(), "failed to fetch https://example.com/a: HTTP 503");
    }

    #[test]
    fn test_malformed_record_names_the_path() {
        let err = CrawlError::MalformedRecord {
            path: PathBuf::from("scraped_pages/abc.json"),
            reason: "missing field `url`".to_string(),
        };
        assert!(err.to_string().contains("scraped_pages/abc.json"));
        assert!(err.to_string().contains("missing field `url`"));
    }
}
