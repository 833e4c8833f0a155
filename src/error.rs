use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Precache failed for '{path}': {reason}")]
    Precache { path: String, reason: String },

    #[error("Upstream unreachable: {0}")]
    Upstream(#[from] crate::upstream::UpstreamError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for WorkerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Precache { path, reason } => {
                tracing::error!(path = %path, reason = %reason, "Precache error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Precache error".to_string(),
                )
            }
            Self::Upstream(e) => {
                tracing::warn!("Upstream error: {e}");
                (StatusCode::BAD_GATEWAY, format!("Upstream unreachable: {e}"))
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type WorkerResult<T> = Result<T, WorkerError>;
