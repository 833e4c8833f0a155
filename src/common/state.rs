use std::sync::Arc;

use crate::config::Config;
use crate::worker::CacheWorker;

/// Shared state for the proxy surface: the worker plus its configuration.
pub struct AppState<U> {
    pub config: Arc<Config>,
    pub worker: Arc<CacheWorker<U>>,
}

impl<U> AppState<U> {
    #[must_use]
    pub fn new(config: Config, worker: CacheWorker<U>) -> Self {
        Self {
            config: Arc::new(config),
            worker: Arc::new(worker),
        }
    }
}

// Manual impl so U itself does not need to be Clone
impl<U> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            worker: self.worker.clone(),
        }
    }
}
