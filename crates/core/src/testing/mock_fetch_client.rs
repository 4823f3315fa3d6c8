//! Mock fetch client for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetch::{FetchClient, FetchError, FetchRequest, FetchResponse};

/// Canned answer for requests whose URL contains a fragment.
type Route = (String, Result<FetchResponse, FetchError>);

/// Mock implementation of the FetchClient trait.
///
/// Answers are matched by URL substring, first match wins. Requests without a
/// matching route fail with `FetchError::Connect`.
///
/// # Example
///
/// ```rust,ignore
/// use trawler_core::testing::MockFetchClient;
///
/// let fetcher = MockFetchClient::new();
/// fetcher.respond("yts.mx", FetchResponse::new(200, body)).await;
/// fetcher.fail("bitsearch.to", FetchError::Timeout).await;
///
/// let source = Yts::new(&YtsConfig::default(), Arc::new(fetcher), timeout);
/// ```
#[derive(Debug, Default)]
pub struct MockFetchClient {
    routes: Arc<RwLock<Vec<Route>>>,
    requests: Arc<RwLock<Vec<FetchRequest>>>,
}

impl MockFetchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL contains `url_fragment` with `response`.
    pub async fn respond(&self, url_fragment: &str, response: FetchResponse) {
        self.routes
            .write()
            .await
            .push((url_fragment.to_string(), Ok(response)));
    }

    /// Fail requests whose URL contains `url_fragment` with `error`.
    pub async fn fail(&self, url_fragment: &str, error: FetchError) {
        self.routes
            .write()
            .await
            .push((url_fragment.to_string(), Err(error)));
    }

    /// Requests received so far.
    pub async fn recorded_requests(&self) -> Vec<FetchRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl FetchClient for MockFetchClient {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let answer = self
            .routes
            .read()
            .await
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, answer)| answer.clone());

        let url = request.url.clone();
        self.requests.write().await.push(request);

        answer.unwrap_or_else(|| Err(FetchError::Connect(format!("no mock route for {}", url))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetch_client_routes() {
        let fetcher = MockFetchClient::new();
        fetcher
            .respond("example.org", FetchResponse::new(200, "hello"))
            .await;
        fetcher.fail("broken.org", FetchError::Timeout).await;

        let ok = fetcher
            .fetch(FetchRequest::get("https://example.org/x"))
            .await
            .unwrap();
        assert_eq!(ok.body, "hello");

        let err = fetcher
            .fetch(FetchRequest::get("https://broken.org/x"))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Timeout);

        let unrouted = fetcher.fetch(FetchRequest::get("https://nowhere.org")).await;
        assert!(matches!(unrouted, Err(FetchError::Connect(_))));

        assert_eq!(fetcher.recorded_requests().await.len(), 3);
    }
}
