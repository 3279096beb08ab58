//! Key-value store abstraction.
//!
//! The store is the only persistence primitive. It guarantees per-key
//! atomicity and nothing more: there are no multi-key transactions, so
//! callers must tolerate partially applied batches.
//!
//! ## Implementations
//!
//! - [`PgKvStore`]: one `kv_entries` table in Postgres
//! - [`MemoryKvStore`]: ordered in-process map, for tests and local runs

mod memory;
mod postgres;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

pub use memory::MemoryKvStore;
pub use postgres::PgKvStore;

/// One stored key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Deleting a missing key is not an error.
    async fn del(&self, key: &str) -> Result<(), StoreError>;

    /// All entries whose key starts with `prefix`, ordered by key.
    ///
    /// Materializes the whole partition. Prefer [`KvStore::scan_prefix_page`]
    /// for anything that may grow with the catalog.
    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<KvEntry>, StoreError>;

    /// At most `limit` entries under `prefix` with key strictly greater than
    /// `start_after`, ordered by key.
    async fn scan_prefix_page(
        &self,
        prefix: &str,
        start_after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<KvEntry>, StoreError> {
        let mut entries = self.get_by_prefix(prefix).await?;
        entries.retain(|e| start_after.map_or(true, |after| e.key.as_str() > after));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Read and decode a JSON value.
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value.
pub async fn set_json<T: Serialize + ?Sized>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
