//! reqwest-backed fetch client with a desktop browser header profile.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use tracing::debug;

use crate::config::FetchConfig;

use super::{FetchClient, FetchError, FetchRequest, FetchResponse};

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,application/json;q=0.8,*/*;q=0.7";

/// Fetch client over a single pooled `reqwest::Client`.
///
/// Every request carries the configured browser headers. Cloning is cheap and
/// shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetchClient {
    client: Client,
}

impl HttpFetchClient {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.accept_language)?);

        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value)
        .map_err(|e| FetchError::Client(format!("invalid header value {:?}: {}", value, e)))
}

#[async_trait]
impl FetchClient for HttpFetchClient {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        debug!(url = %request.url, params = request.params.len(), "Fetching");

        let mut builder = self
            .client
            .get(&request.url)
            .timeout(request.timeout);

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }

        for (key, value) in &request.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| FetchError::Request(format!("invalid header {:?}: {}", key, e)))?;
            builder = builder.header(name, header_value(value)?);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(url = %request.url, status, bytes = body.len(), "Fetch complete");

        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> HttpFetchClient {
        HttpFetchClient::new(&FetchConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_params_and_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api"))
            .and(query_param("q", "debian iso"))
            .and(header("user-agent", FetchConfig::default().user_agent.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let request =
            FetchRequest::get(format!("{}/api", server.uri())).param("q", "debian iso");
        let response = client().fetch(request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "ok");
    }

    #[tokio::test]
    async fn test_fetch_passes_through_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
            .mount(&server)
            .await;

        let response = client()
            .fetch(FetchRequest::get(server.uri()))
            .await
            .unwrap();

        assert_eq!(response.status, 403);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let request = FetchRequest::get(server.uri()).timeout(Duration::from_millis(50));
        let result = client().fetch(request).await;

        assert_eq!(result.unwrap_err(), FetchError::Timeout);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Port 9 (discard) is not expected to be listening in test environments
        let request =
            FetchRequest::get("http://127.0.0.1:9/").timeout(Duration::from_secs(2));
        let result = client().fetch(request).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_user_agent_rejected() {
        let config = FetchConfig {
            user_agent: "bad\nagent".to_string(),
            ..FetchConfig::default()
        };
        assert!(matches!(
            HttpFetchClient::new(&config),
            Err(FetchError::Client(_))
        ));
    }
}
