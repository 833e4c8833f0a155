//! Network boundary between the worker and the dashboard backend.

mod client;

pub use client::HttpUpstream;

use std::future::Future;

use crate::cache::{BufferedResponse, WorkerRequest};

/// Transport-level failure: the request never produced an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Request failed: {0}")]
    Transport(String),
}

/// The worker's view of the network.
///
/// `Err` means transport failure only. A non-2xx status is a perfectly
/// good response as far as this trait is concerned; it comes back as `Ok`
/// and the caller decides what to do with it.
pub trait Upstream: Send + Sync + 'static {
    fn fetch(
        &self,
        request: &WorkerRequest,
    ) -> impl Future<Output = Result<BufferedResponse, UpstreamError>> + Send;
}
