//! Search API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use trawler_core::{AggregateError, AggregateResult, SourceReport, TorrentRecord};

use crate::metrics::record_search;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub records: Vec<TorrentRecord>,
    pub duration_ms: u64,
    pub sources: Vec<SourceReport>,
}

impl From<AggregateResult> for SearchResponse {
    fn from(result: AggregateResult) -> Self {
        Self {
            duration_ms: result.duration_ms(),
            keyword: result.keyword,
            records: result.records,
            sources: result.sources,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/search
///
/// Query every configured source and return the merged records.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.aggregator().aggregate(&body.keyword).await {
        Ok(result) => {
            info!(
                keyword = %result.keyword,
                records = result.records.len(),
                duration_ms = result.duration_ms(),
                "Search completed"
            );
            record_search(if result.is_empty() { "empty" } else { "found" });
            Ok(Json(SearchResponse::from(result)))
        }
        Err(e @ AggregateError::EmptyKeyword) => {
            record_search("invalid");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

/// GET /api/v1/sources
///
/// Configured source names in priority order.
pub async fn list_sources(State(state): State<Arc<AppState>>) -> Json<SourcesResponse> {
    Json(SourcesResponse {
        sources: state.aggregator().source_names(),
    })
}
