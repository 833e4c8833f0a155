use axum::{Json, extract::State};
use serde::Serialize;

use crate::common::AppState;
use crate::upstream::Upstream;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub phase: String,
}

/// Health check endpoint
///
/// Reports the worker's lifecycle phase. Served directly, never routed
/// through the cache.
pub async fn healthz<U: Upstream>(State(state): State<AppState<U>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        phase: state.worker.phase().to_string(),
    })
}
