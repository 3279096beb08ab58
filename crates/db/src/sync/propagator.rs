//! Rename propagation coordinator.
//!
//! After a master data item is renamed, catalog records still carry the old
//! name as plain text. [`RenamePropagator`] walks both catalog collections
//! and rewrites every whole-token occurrence. It never fails: per-record
//! problems are logged and simply not counted.

use mediadex_core::sync::{rewrite_record, PropagationKind, SyncReport};

use crate::models::catalog::CatalogCollection;
use crate::repositories::CatalogRepo;
use crate::store::KvStore;

use super::DEFAULT_SCAN_PAGE_SIZE;

pub struct RenamePropagator<'a> {
    store: &'a dyn KvStore,
    page_size: usize,
}

impl<'a> RenamePropagator<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self {
            store,
            page_size: DEFAULT_SCAN_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Rewrite `old_name` to `new_name` across both catalog collections.
    ///
    /// Equal names return an empty report without scanning anything, so
    /// this is safe to call after every update.
    pub async fn propagate(
        &self,
        kind: PropagationKind,
        old_name: &str,
        new_name: &str,
    ) -> SyncReport {
        let (old_name, new_name) = (old_name.trim(), new_name.trim());
        if old_name == new_name || old_name.is_empty() || new_name.is_empty() {
            return SyncReport::default();
        }

        let records_updated = self
            .rewrite_collection(CatalogCollection::Primary, kind, old_name, new_name)
            .await;
        let secondary_records_updated = self
            .rewrite_collection(CatalogCollection::Secondary, kind, old_name, new_name)
            .await;

        let report = SyncReport {
            records_updated,
            secondary_records_updated,
        };
        tracing::info!(
            ?kind,
            old_name,
            new_name,
            records_updated,
            secondary_records_updated,
            "Rename propagated",
        );
        report
    }

    async fn rewrite_collection(
        &self,
        collection: CatalogCollection,
        kind: PropagationKind,
        old_name: &str,
        new_name: &str,
    ) -> u64 {
        let fields = match collection {
            CatalogCollection::Primary => kind.primary_fields(),
            CatalogCollection::Secondary => kind.secondary_fields(),
        };

        let outcome = CatalogRepo::rewrite_matching(self.store, collection, self.page_size, |record| {
            rewrite_record(record, fields, old_name, new_name)
        })
        .await;

        if outcome.failed > 0 {
            tracing::warn!(
                collection = collection.as_str(),
                scanned = outcome.scanned,
                failed = outcome.failed,
                updated = outcome.updated,
                "Some catalog records could not be rewritten",
            );
        }
        outcome.updated
    }
}
