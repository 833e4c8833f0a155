//! Per-request-class fetch strategies.
//!
//! API data is time-sensitive and prefers freshness, falling back to
//! staleness only when the network is unavailable. Static assets are
//! immutable-by-version and prefer zero-latency cache hits, refreshing the
//! core partition opportunistically on a miss.

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode, header};

use super::CacheWorker;
use crate::cache::{BufferedResponse, WorkerRequest};
use crate::error::WorkerResult;
use crate::upstream::Upstream;

impl<U: Upstream> CacheWorker<U> {
    /// Network-first: prefer the live response. On success the data
    /// partition keeps a copy for later; on transport failure the cached
    /// copy serves instead, and when neither exists the caller gets a
    /// synthetic offline payload rather than a transport error.
    pub(super) async fn network_first(&self, request: WorkerRequest) -> BufferedResponse {
        match self.upstream.fetch(&request).await {
            Ok(response) => {
                if response.is_ok() && request.is_cacheable() {
                    let data = self.storage.open(&self.data_cache_name).await;
                    data.put(request.key(), response.clone()).await;
                }
                response
            }
            Err(e) => {
                tracing::warn!(key = %request.key(), error = %e, "Network failed, trying data cache");
                let data = self.storage.open(&self.data_cache_name).await;
                match data.get(&request.key()).await {
                    Some(cached) => cached,
                    None => offline_response(),
                }
            }
        }
    }

    /// Cache-first: serve from any partition when possible. On a miss the
    /// asset comes from the network and a copy lands in the core partition
    /// for next time. A transport failure with no cache entry propagates
    /// to the caller; no substitute is synthesized for static assets.
    pub(super) async fn cache_first(&self, request: WorkerRequest) -> WorkerResult<BufferedResponse> {
        if let Some(cached) = self.storage.match_any(&request.key()).await {
            return Ok(cached);
        }

        let response = self.upstream.fetch(&request).await?;
        if response.is_ok() && request.is_cacheable() {
            let core = self.storage.open(&self.core_cache_name).await;
            core.put(request.key(), response.clone()).await;
        }
        Ok(response)
    }
}

/// Substitute response for an API request that failed on the network with
/// no cached copy: a well-formed JSON error payload, so the page never sees
/// a transport error for API calls.
///
/// Status is 503 Service Unavailable. The payload represents an error, so
/// it does not masquerade as a 200.
#[must_use]
pub fn offline_response() -> BufferedResponse {
    let body = serde_json::json!({ "error": "Offline and no cached data" });

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    BufferedResponse::new(
        StatusCode::SERVICE_UNAVAILABLE,
        headers,
        Bytes::from(body.to_string()),
    )
}
