//! Sync-aware update dispatcher.
//!
//! Runs the type's update routine, then decides whether the identifying
//! name changed in a way that catalog records care about. Propagation
//! results are attached as a report; they never turn a successful update
//! into a failure.

use mediadex_core::master_data::MasterDataType;
use mediadex_core::sync::{PropagationKind, SyncReport};

use crate::error::RepoError;
use crate::models::master_data::{MasterDataItem, UpdateMasterData};
use crate::repositories::{MasterDataRepo, MasterDataUpdate};
use crate::store::KvStore;

use super::propagator::RenamePropagator;
use super::DEFAULT_SCAN_PAGE_SIZE;

/// A persisted update plus what propagation managed to rewrite.
#[derive(Debug, Clone)]
pub struct SyncedUpdate {
    pub item: MasterDataItem,
    pub sync: SyncReport,
}

pub struct SyncDispatcher<'a> {
    store: &'a dyn KvStore,
    page_size: usize,
}

impl<'a> SyncDispatcher<'a> {
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

    /// Update an item and propagate a rename if one happened.
    ///
    /// Validation, duplicate and not-found rejections are returned before
    /// anything is written. Once the item is persisted the call succeeds.
    pub async fn update_with_sync(
        &self,
        kind: MasterDataType,
        id: &str,
        input: UpdateMasterData,
    ) -> Result<SyncedUpdate, RepoError> {
        let MasterDataUpdate { previous, item } =
            MasterDataRepo::update(self.store, kind, id, input).await?;

        let sync = match PropagationKind::for_master_type(kind) {
            Some(propagation) => self.propagate_if_renamed(propagation, &previous, &item).await,
            None => SyncReport::default(),
        };

        tracing::info!(
            item_type = %kind,
            item_id = %item.id,
            records_updated = sync.records_updated,
            secondary_records_updated = sync.secondary_records_updated,
            "Master data updated",
        );

        Ok(SyncedUpdate { item, sync })
    }

    async fn propagate_if_renamed(
        &self,
        propagation: PropagationKind,
        previous: &MasterDataItem,
        item: &MasterDataItem,
    ) -> SyncReport {
        match (previous.name.as_deref(), item.name.as_deref()) {
            (Some(old), Some(new)) if old != new => {
                RenamePropagator::new(self.store)
                    .with_page_size(self.page_size)
                    .propagate(propagation, old, new)
                    .await
            }
            _ => SyncReport::default(),
        }
    }
}
