use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KvEntry, KvStore};
use crate::error::StoreError;

/// In-memory store over an ordered map.
///
/// Cheap to clone; clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    data: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

fn collect_prefix<'a>(
    range: impl Iterator<Item = (&'a String, &'a String)>,
    prefix: &str,
    limit: usize,
) -> Vec<KvEntry> {
    range
        .take_while(|(k, _)| k.starts_with(prefix))
        .take(limit)
        .map(|(k, v)| KvEntry {
            key: k.clone(),
            value: v.clone(),
        })
        .collect()
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.data
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        self.data.write().await.remove(key);
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<KvEntry>, StoreError> {
        let data = self.data.read().await;
        let range = data.range::<str, _>((Bound::Included(prefix), Bound::Unbounded));
        Ok(collect_prefix(range, prefix, usize::MAX))
    }

    async fn scan_prefix_page(
        &self,
        prefix: &str,
        start_after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<KvEntry>, StoreError> {
        let data = self.data.read().await;
        let lower = match start_after {
            Some(after) if after >= prefix => Bound::Excluded(after),
            _ => Bound::Included(prefix),
        };
        let range = data.range::<str, _>((lower, Bound::Unbounded));
        Ok(collect_prefix(range, prefix, limit))
    }
}
