//! Access to the denormalized catalog collections (`movie:`, `scmovie:`).
//!
//! The record schemas belong to the catalog side of the system; this
//! repository only reads and writes whole JSON objects and provides the
//! streaming rewrite operator used by rename propagation.

use chrono::{SecondsFormat, Utc};
use mediadex_core::sync::UPDATED_AT_FIELD;
use serde_json::Value;

use crate::error::StoreError;
use crate::models::catalog::{CatalogCollection, CatalogRecord};
use crate::store::{get_json, set_json, KvEntry, KvStore};

/// Outcome of one streaming rewrite pass over a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Records read from the store.
    pub scanned: u64,
    /// Records changed and persisted.
    pub updated: u64,
    /// Records that failed to decode or persist and were skipped.
    pub failed: u64,
}

/// Per-record result inside a rewrite pass.
enum RecordOutcome {
    Unchanged,
    Updated,
}

/// Provides read/write access to catalog records.
pub struct CatalogRepo;

impl CatalogRepo {
    pub async fn find(
        store: &dyn KvStore,
        collection: CatalogCollection,
        id: &str,
    ) -> Result<Option<CatalogRecord>, StoreError> {
        get_json(store, &collection.key(id)).await
    }

    /// Write a whole record under `id`.
    pub async fn save(
        store: &dyn KvStore,
        collection: CatalogCollection,
        id: &str,
        record: &CatalogRecord,
    ) -> Result<(), StoreError> {
        set_json(store, &collection.key(id), record).await
    }

    /// Stream every record of `collection` page by page, apply `transform`,
    /// and persist the records it reports as changed.
    ///
    /// Each changed record gets a fresh `updatedAt` and is written on its
    /// own. A record that fails to decode or persist is logged and counted
    /// in [`RewriteOutcome::failed`]; the pass continues with the next one.
    /// A failure to fetch a page ends the pass with the counts so far.
    pub async fn rewrite_matching<F>(
        store: &dyn KvStore,
        collection: CatalogCollection,
        page_size: usize,
        mut transform: F,
    ) -> RewriteOutcome
    where
        F: FnMut(&mut CatalogRecord) -> bool + Send,
    {
        let page_size = page_size.max(1);
        let mut outcome = RewriteOutcome::default();
        let mut cursor: Option<String> = None;

        loop {
            let page = match store
                .scan_prefix_page(collection.prefix(), cursor.as_deref(), page_size)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(
                        collection = collection.as_str(),
                        after = ?cursor,
                        error = %e,
                        "Catalog scan aborted: page fetch failed",
                    );
                    break;
                }
            };

            let last_page = page.len() < page_size;
            cursor = page.last().map(|entry| entry.key.clone());

            for entry in page {
                outcome.scanned += 1;
                match rewrite_entry(store, &entry, &mut transform).await {
                    Ok(RecordOutcome::Updated) => outcome.updated += 1,
                    Ok(RecordOutcome::Unchanged) => {}
                    Err(e) => {
                        outcome.failed += 1;
                        tracing::warn!(
                            key = %entry.key,
                            error = %e,
                            "Skipping catalog record during rewrite",
                        );
                    }
                }
            }

            if last_page || cursor.is_none() {
                break;
            }
        }

        outcome
    }
}

async fn rewrite_entry<F>(
    store: &dyn KvStore,
    entry: &KvEntry,
    transform: &mut F,
) -> Result<RecordOutcome, StoreError>
where
    F: FnMut(&mut CatalogRecord) -> bool + Send,
{
    let mut record: CatalogRecord = serde_json::from_str(&entry.value)?;
    if !transform(&mut record) {
        return Ok(RecordOutcome::Unchanged);
    }

    record.insert(
        UPDATED_AT_FIELD.to_string(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    set_json(store, &entry.key, &record).await?;
    Ok(RecordOutcome::Updated)
}
