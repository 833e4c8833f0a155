//! Unit tests for request identity and the buffered response model.
//!
//! Run with: cargo test --test cache_unit_test

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};

use dashcache::cache::{BufferedResponse, WorkerRequest};
use dashcache::config::parse_manifest;

#[test]
fn request_key_includes_method_and_path() {
    let get = WorkerRequest::get("/api/sensors");
    let post = WorkerRequest::new(Method::POST, "/api/sensors");

    assert_eq!(get.key().as_str(), "GET /api/sensors");
    assert_ne!(get.key(), post.key());

    // Query strings are part of the identity
    assert_ne!(
        WorkerRequest::get("/api/sensors?window=1h").key(),
        WorkerRequest::get("/api/sensors").key()
    );
}

#[test]
fn only_get_requests_are_cacheable() {
    assert!(WorkerRequest::get("/api/sensors").is_cacheable());
    assert!(!WorkerRequest::new(Method::POST, "/api/query").is_cacheable());
    assert!(!WorkerRequest::new(Method::PUT, "/api/sensors").is_cacheable());
}

#[test]
fn ok_mirrors_the_fetch_api_flag() {
    let ok = BufferedResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::new());
    assert!(ok.is_ok());

    let not_found = BufferedResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), Bytes::new());
    assert!(!not_found.is_ok());

    let server_error =
        BufferedResponse::new(StatusCode::INTERNAL_SERVER_ERROR, HeaderMap::new(), Bytes::new());
    assert!(!server_error.is_ok());
}

#[test]
fn manifest_override_parses_cleanly() {
    assert_eq!(
        parse_manifest("/,/index.html, /app.js"),
        vec!["/", "/index.html", "/app.js"]
    );

    // Trailing commas and blanks are dropped
    assert_eq!(parse_manifest("/app.js,,"), vec!["/app.js"]);
    assert!(parse_manifest("").is_empty());
}
