use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};

/// A request as seen by the worker: method plus origin-relative path,
/// query string included.
///
/// Client headers and the buffered body travel with the request so the
/// upstream sees exactly what the page sent; neither is part of the cache
/// identity.
#[derive(Debug, Clone)]
pub struct WorkerRequest {
    pub method: Method,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl WorkerRequest {
    #[must_use]
    pub fn new(method: Method, path_and_query: impl Into<String>) -> Self {
        Self {
            method,
            path_and_query: path_and_query.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    #[must_use]
    pub fn get(path_and_query: impl Into<String>) -> Self {
        Self::new(Method::GET, path_and_query)
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Request identity used as the cache key.
    #[must_use]
    pub fn key(&self) -> RequestKey {
        RequestKey(format!("{} {}", self.method, self.path_and_query))
    }

    /// Only GET responses are ever written to a partition.
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        self.method == Method::GET
    }
}

/// Cache key: method plus URL. Effectively GET-only, since nothing else is
/// ever stored, but the method is kept in the key so a POST can never
/// shadow a cached GET to the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey(String);

impl RequestKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A response split into status/header metadata plus a re-readable body
/// buffer.
///
/// A network response body can only be consumed once; buffering it up front
/// makes the response cheap to clone, so the same payload can be written to
/// a cache partition and returned to the caller.
#[derive(Debug, Clone)]
pub struct BufferedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl BufferedResponse {
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Mirrors the fetch-API `ok` flag: true for 2xx statuses only.
    /// Non-2xx responses are returned to callers but never cached.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }
}
