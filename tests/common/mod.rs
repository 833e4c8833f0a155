//! Shared test fixtures: a scriptable upstream and a baseline config.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use dashcache::cache::{BufferedResponse, WorkerRequest};
use dashcache::config::Config;
use dashcache::upstream::{Upstream, UpstreamError};

/// Scriptable upstream: canned responses per path, an offline switch, and a
/// call counter to assert whether the network was touched.
#[derive(Clone, Default)]
pub struct MockUpstream {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<String, (StatusCode, &'static str)>,
    offline: AtomicBool,
    calls: AtomicUsize,
    requests: Mutex<Vec<WorkerRequest>>,
}

impl MockUpstream {
    pub fn with_routes(routes: &[(&str, StatusCode, &'static str)]) -> Self {
        let routes = routes
            .iter()
            .map(|(path, status, body)| ((*path).to_string(), (*status, *body)))
            .collect();

        Self {
            inner: Arc::new(Inner {
                routes,
                offline: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Simulate transport failure for every subsequent fetch.
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// The last request this upstream observed, headers and body included.
    pub fn last_request(&self) -> Option<WorkerRequest> {
        self.inner.requests.lock().unwrap().last().cloned()
    }
}

impl Upstream for MockUpstream {
    async fn fetch(&self, request: &WorkerRequest) -> Result<BufferedResponse, UpstreamError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.requests.lock().unwrap().push(request.clone());

        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(UpstreamError::Transport("connection refused".to_string()));
        }

        match self.inner.routes.get(&request.path_and_query) {
            Some((status, body)) => Ok(BufferedResponse::new(
                *status,
                HeaderMap::new(),
                Bytes::from_static(body.as_bytes()),
            )),
            None => Ok(BufferedResponse::new(
                StatusCode::NOT_FOUND,
                HeaderMap::new(),
                Bytes::new(),
            )),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        upstream_base_url: "http://backend.local".to_string(),
        core_cache_name: "dashboard-core-v2".to_string(),
        data_cache_name: "dashboard-data-v1".to_string(),
        cache_max_bytes: 16 * 1024 * 1024,
        api_prefix: "/api/".to_string(),
        precache_manifest: vec![
            "/".to_string(),
            "/index.html".to_string(),
            "/app.js".to_string(),
        ],
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
    }
}
