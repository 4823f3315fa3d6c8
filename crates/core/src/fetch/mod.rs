//! HTTP retrieval seam shared by all sources.
//!
//! Sources never talk to `reqwest` directly; they receive an
//! `Arc<dyn FetchClient>` at construction time so tests can swap in a mock.

mod http;
mod types;

pub use http::HttpFetchClient;
pub use types::*;
