//! The offline cache worker: lifecycle phases and fetch interception.
//!
//! The worker is driven entirely by lifecycle events from its host. The
//! proxy binary delivers `Install` and `Activate` once at startup and a
//! `Fetch` per incoming request; each `Fetch` is handled independently of
//! the others, with the cache partitions as the only shared state.

mod strategy;

use std::sync::{PoisonError, RwLock};

use crate::cache::{BufferedResponse, CacheStorage, WorkerRequest};
use crate::config::Config;
use crate::error::{WorkerError, WorkerResult};
use crate::upstream::Upstream;

/// Lifecycle events delivered by the host.
///
/// The host must await the future returned by [`CacheWorker::handle_event`]
/// to completion before proceeding; tearing the worker down mid-operation
/// voids the install and activate guarantees.
#[derive(Debug)]
pub enum LifecycleEvent {
    Install,
    Activate,
    Fetch(WorkerRequest),
}

/// Result of handling a lifecycle event.
#[derive(Debug)]
pub enum EventOutcome {
    Installed,
    Activated,
    Response(BufferedResponse),
}

/// Worker lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    Idle,
    Installed,
    Active,
}

impl std::fmt::Display for WorkerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerPhase::Idle => write!(f, "idle"),
            WorkerPhase::Installed => write!(f, "installed"),
            WorkerPhase::Active => write!(f, "active"),
        }
    }
}

pub struct CacheWorker<U> {
    storage: CacheStorage,
    upstream: U,
    core_cache_name: String,
    data_cache_name: String,
    api_prefix: String,
    precache_manifest: Vec<String>,
    phase: RwLock<WorkerPhase>,
}

impl<U: Upstream> CacheWorker<U> {
    /// Build a worker from configuration. Partition names, the API prefix,
    /// and the precache manifest are fixed for the worker's lifetime.
    #[must_use]
    pub fn new(config: &Config, upstream: U) -> Self {
        Self {
            storage: CacheStorage::new(config.cache_max_bytes),
            upstream,
            core_cache_name: config.core_cache_name.clone(),
            data_cache_name: config.data_cache_name.clone(),
            api_prefix: config.api_prefix.clone(),
            precache_manifest: config.precache_manifest.clone(),
            phase: RwLock::new(WorkerPhase::Idle),
        }
    }

    #[must_use]
    pub fn phase(&self) -> WorkerPhase {
        // A poisoned lock still holds a valid phase value
        *self.phase.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_phase(&self, next: WorkerPhase) {
        *self.phase.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// The partition registry. Exposed so hosts can inspect cache state.
    #[must_use]
    pub fn storage(&self) -> &CacheStorage {
        &self.storage
    }

    /// Handle one lifecycle event.
    pub async fn handle_event(&self, event: LifecycleEvent) -> WorkerResult<EventOutcome> {
        match event {
            LifecycleEvent::Install => self.install().await.map(|()| EventOutcome::Installed),
            LifecycleEvent::Activate => self.activate().await.map(|()| EventOutcome::Activated),
            LifecycleEvent::Fetch(request) => self
                .handle_fetch(request)
                .await
                .map(EventOutcome::Response),
        }
    }

    /// Install phase: precache the asset manifest into the core partition.
    ///
    /// Every manifest asset is fetched before anything is written, so a
    /// single failed asset leaves no partial precache behind and the
    /// previous worker version stays in control.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Precache` if any asset fails to fetch or comes
    /// back with a non-2xx status.
    pub async fn install(&self) -> WorkerResult<()> {
        tracing::info!(assets = self.precache_manifest.len(), "Caching core assets");

        let fetches = self.precache_manifest.iter().map(|path| async move {
            let request = WorkerRequest::get(path.as_str());
            match self.upstream.fetch(&request).await {
                Ok(response) if response.is_ok() => Ok((request, response)),
                Ok(response) => Err(WorkerError::Precache {
                    path: path.clone(),
                    reason: format!("HTTP {}", response.status),
                }),
                Err(e) => Err(WorkerError::Precache {
                    path: path.clone(),
                    reason: e.to_string(),
                }),
            }
        });

        let staged = futures::future::try_join_all(fetches).await?;

        let core = self.storage.open(&self.core_cache_name).await;
        for (request, response) in staged {
            core.put(request.key(), response).await;
        }

        self.set_phase(WorkerPhase::Installed);
        tracing::info!(
            partition = %self.core_cache_name,
            "Install complete, taking over without waiting"
        );
        Ok(())
    }

    /// Activate phase: sweep partitions left over from previous versions.
    ///
    /// Every partition whose name is neither the current core nor the
    /// current data name is deleted wholesale.
    pub async fn activate(&self) -> WorkerResult<()> {
        for name in self.storage.names().await {
            if name != self.core_cache_name && name != self.data_cache_name {
                tracing::info!(partition = %name, "Deleting old cache");
                self.storage.delete(&name).await;
            }
        }

        self.set_phase(WorkerPhase::Active);
        tracing::info!("Worker active, claiming open clients");
        Ok(())
    }

    /// Fetch interception: network-first for API paths, cache-first for
    /// everything else.
    ///
    /// # Errors
    ///
    /// Only the cache-first path can fail, and only when the network is
    /// down and nothing is cached. The network-first path always produces
    /// a response, synthesizing an offline payload as a last resort.
    pub async fn handle_fetch(&self, request: WorkerRequest) -> WorkerResult<BufferedResponse> {
        if request.path_and_query.starts_with(&self.api_prefix) {
            Ok(self.network_first(request).await)
        } else {
            self.cache_first(request).await
        }
    }
}
