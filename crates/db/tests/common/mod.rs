#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use mediadex_db::error::StoreError;
use mediadex_db::models::catalog::{CatalogCollection, CatalogRecord};
use mediadex_db::repositories::CatalogRepo;
use mediadex_db::store::{KvEntry, KvStore, MemoryKvStore};
use serde_json::Value;

/// Memory store that records scans and writes and can be told to fail
/// `set` for specific keys.
#[derive(Default)]
pub struct InstrumentedStore {
    pub inner: MemoryKvStore,
    failing_keys: Mutex<HashSet<String>>,
    scanned_prefixes: Mutex<Vec<String>>,
    written_keys: Mutex<Vec<String>>,
}

impl InstrumentedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes_to(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_string());
    }

    /// Prefixes scanned so far, in call order (one entry per page).
    pub fn scans(&self) -> Vec<String> {
        self.scanned_prefixes.lock().unwrap().clone()
    }

    pub fn scans_of(&self, prefix: &str) -> usize {
        self.scans().iter().filter(|p| p.as_str() == prefix).count()
    }

    pub fn writes(&self) -> Vec<String> {
        self.written_keys.lock().unwrap().clone()
    }

    pub fn writes_with_prefix(&self, prefix: &str) -> usize {
        self.writes().iter().filter(|k| k.starts_with(prefix)).count()
    }

    pub fn reset_counters(&self) {
        self.scanned_prefixes.lock().unwrap().clear();
        self.written_keys.lock().unwrap().clear();
    }
}

#[async_trait]
impl KvStore for InstrumentedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(StoreError::Unavailable(format!("injected failure for {key}")));
        }
        self.written_keys.lock().unwrap().push(key.to_string());
        self.inner.set(key, value).await
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        self.inner.del(key).await
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<KvEntry>, StoreError> {
        self.scanned_prefixes.lock().unwrap().push(prefix.to_string());
        self.inner.get_by_prefix(prefix).await
    }

    async fn scan_prefix_page(
        &self,
        prefix: &str,
        start_after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<KvEntry>, StoreError> {
        self.scanned_prefixes.lock().unwrap().push(prefix.to_string());
        self.inner.scan_prefix_page(prefix, start_after, limit).await
    }
}

/// Build a catalog record from a `json!` object literal.
pub fn record(value: Value) -> CatalogRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub async fn seed(store: &dyn KvStore, collection: CatalogCollection, id: &str, value: Value) {
    CatalogRepo::save(store, collection, id, &record(value))
        .await
        .unwrap();
}

pub async fn load(store: &dyn KvStore, collection: CatalogCollection, id: &str) -> CatalogRecord {
    CatalogRepo::find(store, collection, id)
        .await
        .unwrap()
        .expect("record exists")
}
