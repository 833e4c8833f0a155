pub mod health;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::cache::{BufferedResponse, WorkerRequest};
use crate::common::AppState;
use crate::error::{WorkerError, WorkerResult};
use crate::upstream::Upstream;

/// Request bodies are buffered before forwarding; anything larger is refused.
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

pub fn build_router<U: Upstream>(state: AppState<U>) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz::<U>))
        .fallback(intercept::<U>)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Every request that is not a worker control route is dispatched to the
/// cache worker as a fetch event. The page is unaware any caching is
/// happening; it just issues requests.
async fn intercept<U: Upstream>(
    State(state): State<AppState<U>>,
    request: Request<Body>,
) -> WorkerResult<Response> {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());

    let body = axum::body::to_bytes(body, MAX_REQUEST_BODY_BYTES)
        .await
        .map_err(|e| WorkerError::Internal(format!("Failed to buffer request body: {e}")))?;

    let worker_request = WorkerRequest::new(parts.method, path_and_query)
        .with_headers(parts.headers)
        .with_body(body);

    let response = state.worker.handle_fetch(worker_request).await?;
    Ok(to_http_response(response))
}

fn to_http_response(buffered: BufferedResponse) -> Response {
    let mut response = Response::new(Body::from(buffered.body));
    *response.status_mut() = buffered.status;
    *response.headers_mut() = buffered.headers;
    response
}
