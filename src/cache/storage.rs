use moka::future::Cache;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{BufferedResponse, RequestKey};

/// One named partition: request identity -> stored response.
///
/// Entries have no TTL. An entry is overwritten in place on every refresh
/// and lives until its partition is deleted wholesale. Capacity is weighted
/// by body size, standing in for the storage quota a persistent cache
/// backend would impose.
#[derive(Clone)]
pub struct CachePartition {
    name: String,
    entries: Cache<RequestKey, BufferedResponse>,
}

impl CachePartition {
    fn new(name: String, max_bytes: u64) -> Self {
        let entries = Cache::builder()
            .weigher(|_key: &RequestKey, value: &BufferedResponse| -> u32 {
                // Weight is the body size in bytes (capped at u32::MAX)
                value.body.len().try_into().unwrap_or(u32::MAX)
            })
            .max_capacity(max_bytes)
            .build();

        Self { name, entries }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn get(&self, key: &RequestKey) -> Option<BufferedResponse> {
        self.entries.get(key).await
    }

    /// Store a response. Infallible: a failed write must never affect the
    /// response already being returned to the caller, so there is no error
    /// path to propagate.
    pub async fn put(&self, key: RequestKey, response: BufferedResponse) {
        let size = response.body.len();
        self.entries.insert(key.clone(), response).await;
        tracing::debug!(
            partition = %self.name,
            key = %key,
            size_bytes = size,
            "cache_stored"
        );
    }
}

/// Registry of cache partitions, created on first open and deletable as a
/// unit.
#[derive(Clone)]
pub struct CacheStorage {
    max_bytes: u64,
    partitions: Arc<RwLock<BTreeMap<String, CachePartition>>>,
}

impl CacheStorage {
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            partitions: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Open a partition, creating it if absent.
    pub async fn open(&self, name: &str) -> CachePartition {
        let mut partitions = self.partitions.write().await;
        partitions
            .entry(name.to_string())
            .or_insert_with(|| CachePartition::new(name.to_string(), self.max_bytes))
            .clone()
    }

    /// Enumerate all existing partition names.
    pub async fn names(&self) -> Vec<String> {
        self.partitions.read().await.keys().cloned().collect()
    }

    /// Delete a partition wholesale. Returns whether it existed.
    pub async fn delete(&self, name: &str) -> bool {
        self.partitions.write().await.remove(name).is_some()
    }

    /// Look up a request across every partition. Cache-first lookups are
    /// not restricted to the core partition, so an asset cached under a
    /// superseded name still serves until the activate sweep removes it.
    pub async fn match_any(&self, key: &RequestKey) -> Option<BufferedResponse> {
        let partitions: Vec<CachePartition> =
            self.partitions.read().await.values().cloned().collect();

        for partition in partitions {
            if let Some(hit) = partition.get(key).await {
                tracing::debug!(partition = %partition.name, key = %key, "cache_hit");
                return Some(hit);
            }
        }

        None
    }
}
