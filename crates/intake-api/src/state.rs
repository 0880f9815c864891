//! Application state shared by all handlers.

use intake_core::Config;
use intake_storage::ApplicationStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration (directories are absolute after setup)
    pub config: Arc<Config>,
    /// Persister for accepted submissions
    pub store: Arc<dyn ApplicationStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ApplicationStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
