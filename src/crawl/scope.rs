// src/crawl/scope.rs
// =============================================================================
// Decides which discovered links the crawler is allowed to follow.
//
// A URL is in scope when:
// 1. Its scheme is http or https
// 2. Its host is the target domain (or a subdomain of it)
// 3. Its full string starts with the configured base prefix
//
// The predicate is pure: same URL in, same answer out. It is used both when
// enqueueing freshly extracted links and when re-expanding links stored in
// records that are already on disk.
// =============================================================================

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePredicate {
    domain: String,
    base_prefix: String,
}

impl ScopePredicate {
    pub fn new(domain: impl Into<String>, base_prefix: impl Into<String>) -> Self {
        Self {
            domain: domain.into().to_ascii_lowercase(),
            base_prefix: base_prefix.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn base_prefix(&self) -> &str {
        &self.base_prefix
    }

    pub fn accepts(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
            && self.host_in_domain(url)
            && url.as_str().starts_with(&self.base_prefix)
    }

    // "bu.edu" matches "bu.edu" and "www.bu.edu", but not "notbu.edu"
    fn host_in_domain(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();

        if host == self.domain {
            return true;
        }
        host.strip_suffix(self.domain.as_str())
            .map_or(false, |rest| rest.ends_with('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bu_scope() -> ScopePredicate {
        ScopePredicate::new("bu.edu", "https://www.bu.edu/tech/support/research/")
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_accepts_page_under_prefix() {
        let scope = bu_scope();
        assert!(scope.accepts(&url("https://www.bu.edu/tech/support/research/software/")));
    }

    #[test]
    fn test_rejects_outside_prefix() {
        let scope = bu_scope();
        assert!(!scope.accepts(&url("https://www.bu.edu/admissions/")));
    }

    #[test]
    fn test_rejects_other_scheme() {
        let scope = ScopePredicate::new("bu.edu", "ftp://www.bu.edu/");
        assert!(!scope.accepts(&url("ftp://www.bu.edu/tech/")));
    }

    #[test]
    fn test_rejects_lookalike_domain() {
        let scope = ScopePredicate::new("bu.edu", "https://");
        assert!(scope.accepts(&url("https://bu.edu/")));
        assert!(scope.accepts(&url("https://www.BU.edu/")));
        assert!(!scope.accepts(&url("https://notbu.edu/")));
        assert!(!scope.accepts(&url("https://bu.edu.evil.com/")));
    }

    #[test]
    fn test_ip_host() {
        let scope = ScopePredicate::new("127.0.0.1", "http://127.0.0.1:8080/");
        assert!(scope.accepts(&url("http://127.0.0.1:8080/docs")));
        assert!(!scope.accepts(&url("http://127.0.0.1:9090/docs")));
    }
}
