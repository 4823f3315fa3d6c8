//! Types for the HTTP fetch seam.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Default per-request timeout when a caller does not pick one.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A single GET request issued by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Absolute URL, possibly already carrying a query string.
    pub url: String,
    /// Extra query parameters appended to the URL.
    pub params: Vec<(String, String)>,
    /// Extra headers, applied after the client's own header profile.
    pub headers: Vec<(String, String)>,
    /// Upper bound for the whole request, body included.
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
            headers: Vec::new(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Value of a query parameter, if set.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors surfaced by a fetch client.
///
/// A non-2xx status is not an error at this layer; sources decide what a
/// status means for them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() {
            FetchError::Body(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// HTTP retrieval shared by every source.
///
/// Implementations must be safe to call concurrently from many tasks and must
/// not mutate shared state observable by callers.
#[async_trait]
pub trait FetchClient: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_request_builder() {
        let request = FetchRequest::get("https://example.org/api")
            .param("q", "ubuntu")
            .param("sort", "seeders")
            .header("Referer", "https://example.org")
            .timeout(Duration::from_secs(3));

        assert_eq!(request.url, "https://example.org/api");
        assert_eq!(request.param_value("q"), Some("ubuntu"));
        assert_eq!(request.param_value("sort"), Some("seeders"));
        assert_eq!(request.param_value("missing"), None);
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_fetch_request_default_timeout() {
        let request = FetchRequest::get("https://example.org");
        assert_eq!(request.timeout, DEFAULT_FETCH_TIMEOUT);
    }

    #[test]
    fn test_fetch_response_is_success() {
        assert!(FetchResponse::new(200, "").is_success());
        assert!(FetchResponse::new(204, "").is_success());
        assert!(!FetchResponse::new(301, "").is_success());
        assert!(!FetchResponse::new(403, "").is_success());
        assert!(!FetchResponse::new(503, "").is_success());
    }
}
