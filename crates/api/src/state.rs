use std::sync::Arc;

use mediadex_db::store::KvStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Key-value store backing every partition.
    pub store: Arc<dyn KvStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn store(&self) -> &dyn KvStore {
        self.store.as_ref()
    }
}
