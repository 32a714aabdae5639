//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::metrics::ProviderStats;
use crate::results::SearchResult;
use crate::search::CallContext;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

static IMDB_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^tt\d+$").expect("valid IMDb ID regex"));

/// Search results response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub imdb_id: String,
    pub number_of_results: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    pub slow: bool,
    pub timeout_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_searches: u64,
    pub providers: HashMap<String, ProviderStats>,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: error.into() })).into_response()
}

/// Search handler
pub async fn search(State(state): State<AppState>, Path(imdb_id): Path<String>) -> Response {
    if !IMDB_ID_REGEX.is_match(&imdb_id) {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid IMDb ID: {}", imdb_id),
        );
    }

    // Cancelled when the handler returns or the client goes away
    let cancellation = CancellationToken::new();
    let _guard = cancellation.clone().drop_guard();
    let ctx = CallContext::with_cancellation(cancellation);

    match state.aggregator.find_results(&ctx, &imdb_id).await {
        Ok(results) => Json(SearchResponse {
            imdb_id,
            number_of_results: results.len(),
            results,
        })
        .into_response(),
        Err(e @ SearchError::AllProvidersFailed { .. }) => {
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// Configured providers
pub async fn providers(State(state): State<AppState>) -> impl IntoResponse {
    let aggregator = &state.aggregator;
    let providers: Vec<ProviderInfo> = aggregator
        .registry()
        .iter()
        .map(|(name, provider)| ProviderInfo {
            name: name.to_string(),
            slow: provider.is_slow(),
            timeout_ms: aggregator.budget_for(provider.as_ref()).as_millis() as u64,
        })
        .collect();

    Json(providers)
}

/// Provider statistics
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatsResponse {
        total_searches: state.metrics.get_total_searches(),
        providers: state.metrics.get_provider_stats(),
    })
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "instance_name": state.instance_name(),
    }))
}
