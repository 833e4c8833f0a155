//! Dashcache - Offline cache worker for the IoT sensor dashboard
//!
//! This library exposes the core modules for testing and reuse.

pub mod cache;
pub mod common;
pub mod config;
pub mod error;
pub mod routes;
pub mod upstream;
pub mod worker;
