//! Cache partitions and the entries they store.
//!
//! A partition is a named, independently deletable store of
//! request identity -> buffered response. Two partitions are in active use:
//! `core` (versioned, holds the precached static assets) and `data`
//! (holds the most recent successful response per API endpoint). Anything
//! else found in the registry is a leftover from a previous version and is
//! swept during activation.

mod entry;
mod storage;

pub use entry::{BufferedResponse, RequestKey, WorkerRequest};
pub use storage::{CachePartition, CacheStorage};
