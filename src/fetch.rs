// src/fetch.rs
// =============================================================================
// This module downloads pages over HTTP(S).
//
// Key behaviour:
// - One reqwest Client is built up front and reused (connection pooling)
// - Every request has a bounded timeout
// - No cookies, auth or session state are carried between requests
// - Anything other than a 2xx status is an error; the crawler drops the URL
//
// Failures are bucketed into FetchError variants (status / timeout /
// connect / other) so the log line says what actually went wrong.
// =============================================================================

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::{CrawlError, FetchError};

pub struct Fetcher {
    client: Client,
}

// A 2xx response: the body plus what the server said it was
#[derive(Debug)]
pub struct FetchedPage {
    pub body: String,
    pub content_type: Option<String>,
}

impl FetchedPage {
    // No Content-Type header at all is given the benefit of the doubt
    pub fn is_html(&self) -> bool {
        match &self.content_type {
            Some(content_type) => content_type.to_ascii_lowercase().contains("html"),
            None => true,
        }
    }
}

impl Fetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    // GETs a page and returns its body as text
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        // Anything outside 2xx is a failure; the caller drops the URL
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Read the header before text() consumes the response
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.text().await?;
        Ok(FetchedPage { body, content_type })
    }
}
