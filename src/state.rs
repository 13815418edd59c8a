use std::sync::Arc;

use crate::attorney::AttorneyDirectory;
use crate::config::AppConfig;

/// Shared, read-only application state.
///
/// Nothing here is mutated after startup; every request loads its own
/// template copy.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub attorneys: AttorneyDirectory,
}

impl AppState {
    pub fn new(config: AppConfig, attorneys: AttorneyDirectory) -> Self {
        Self {
            config: Arc::new(config),
            attorneys,
        }
    }
}
