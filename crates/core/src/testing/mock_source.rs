//! Mock source for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::source::{Source, SourceError, TorrentRecord};

/// Mock implementation of the Source trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable records
/// - Count calls and record keywords for assertions
/// - Simulate delays, failures and panics
///
/// # Example
///
/// ```rust,ignore
/// use trawler_core::testing::{MockSource, fixtures};
///
/// let source = MockSource::with_records("solid", vec![
///     fixtures::record("Solid", "Ubuntu 24.04", "magnet:?xt=urn:btih:abc"),
/// ]);
/// source.set_delay(Duration::from_millis(50)).await;
///
/// let records = source.search("ubuntu").await;
/// assert_eq!(records.len(), 1);
/// assert_eq!(source.call_count(), 1);
/// ```
#[derive(Debug)]
pub struct MockSource {
    name: String,
    /// Records to return.
    records: Arc<RwLock<Vec<TorrentRecord>>>,
    /// Keywords searched so far.
    keywords: Arc<RwLock<Vec<String>>>,
    /// Artificial latency before answering.
    delay: Arc<RwLock<Option<Duration>>>,
    /// If set, searches fail with this HTTP status.
    failure_status: Arc<RwLock<Option<u16>>>,
    /// If set, searches panic.
    panic_on_search: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockSource {
    /// Create a mock source returning no records.
    pub fn new(name: &str) -> Self {
        Self::with_records(name, Vec::new())
    }

    /// Create a mock source with predefined records.
    pub fn with_records(name: &str, records: Vec<TorrentRecord>) -> Self {
        Self {
            name: name.to_string(),
            records: Arc::new(RwLock::new(records)),
            keywords: Arc::new(RwLock::new(Vec::new())),
            delay: Arc::new(RwLock::new(None)),
            failure_status: Arc::new(RwLock::new(None)),
            panic_on_search: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the records to return for subsequent searches.
    pub async fn set_records(&self, records: Vec<TorrentRecord>) {
        *self.records.write().await = records;
    }

    /// Delay every search by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Make every search fail as if the upstream answered with `status`.
    pub async fn set_failure_status(&self, status: u16) {
        *self.failure_status.write().await = Some(status);
    }

    /// Make every search panic.
    pub fn set_panic(&self, panic: bool) {
        self.panic_on_search.store(panic, Ordering::SeqCst);
    }

    /// Number of times `fetch_records` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Keywords searched so far, in call order.
    pub async fn recorded_keywords(&self) -> Vec<String> {
        self.keywords.read().await.clone()
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_records(&self, keyword: &str) -> Result<Vec<TorrentRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.keywords.write().await.push(keyword.to_string());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.panic_on_search.load(Ordering::SeqCst) {
            panic!("mock source {} panicked", self.name);
        }

        if let Some(status) = *self.failure_status.read().await {
            return Err(SourceError::Status(status));
        }

        Ok(self.records.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_mock_source_returns_records() {
        let source = MockSource::with_records("a", vec![fixtures::record("A", "one", "m1")]);

        let records = source.search("kw").await;
        assert_eq!(records.len(), 1);
        assert_eq!(source.call_count(), 1);
        assert_eq!(source.recorded_keywords().await, vec!["kw".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_source_failure_is_absorbed_by_search() {
        let source = MockSource::with_records("a", vec![fixtures::record("A", "one", "m1")]);
        source.set_failure_status(500).await;

        assert!(matches!(
            source.fetch_records("kw").await,
            Err(SourceError::Status(500))
        ));
        assert!(source.search("kw").await.is_empty());
    }
}
