//! Repository for master data partitions (`master:{type}:`).
//!
//! Provides list/find/create/update/delete over the key-value store and
//! enforces name uniqueness within each type's duplicate scope.

use chrono::Utc;
use mediadex_core::error::CoreError;
use mediadex_core::keys::{master_data_key, master_data_partition};
use mediadex_core::master_data::{Identity, MasterDataType};
use mediadex_core::types::new_item_id;

use crate::error::{RepoError, StoreError};
use crate::models::master_data::{CreateMasterData, MasterDataItem, UpdateMasterData};
use crate::store::{get_json, set_json, KvStore};

/// Result of an update: the stored item before and after the merge.
#[derive(Debug, Clone)]
pub struct MasterDataUpdate {
    pub previous: MasterDataItem,
    pub item: MasterDataItem,
}

/// Provides CRUD operations for master data items.
pub struct MasterDataRepo;

impl MasterDataRepo {
    /// List every item of a type, sorted by identifying name.
    ///
    /// Entries that fail to decode (or decode to another type) are logged
    /// and skipped.
    pub async fn list_by_type(
        store: &dyn KvStore,
        kind: MasterDataType,
    ) -> Result<Vec<MasterDataItem>, StoreError> {
        let entries = store.get_by_prefix(&master_data_partition(kind)).await?;

        let mut items: Vec<MasterDataItem> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_str::<MasterDataItem>(&entry.value) {
                Ok(item) if item.kind == kind => Some(item),
                Ok(item) => {
                    tracing::warn!(
                        key = %entry.key,
                        stored_type = %item.kind,
                        "Skipping master data entry stored under the wrong partition",
                    );
                    None
                }
                Err(e) => {
                    tracing::warn!(key = %entry.key, error = %e, "Skipping malformed master data entry");
                    None
                }
            })
            .collect();

        items.sort_by_cached_key(|item| item.identity().display().to_lowercase());
        Ok(items)
    }

    /// Find an item by id.
    ///
    /// An entry whose stored `type` does not match its partition is treated
    /// as absent, the same way [`Self::list_by_type`] skips it.
    pub async fn find_by_id(
        store: &dyn KvStore,
        kind: MasterDataType,
        id: &str,
    ) -> Result<Option<MasterDataItem>, StoreError> {
        let key = master_data_key(kind, id);
        let item: Option<MasterDataItem> = get_json(store, &key).await?;
        Ok(item.filter(|item| {
            if item.kind != kind {
                tracing::warn!(
                    key = %key,
                    stored_type = %item.kind,
                    "Ignoring master data entry stored under the wrong partition",
                );
                return false;
            }
            true
        }))
    }

    /// Validate and insert a new item, returning it.
    pub async fn create(
        store: &dyn KvStore,
        kind: MasterDataType,
        input: CreateMasterData,
    ) -> Result<MasterDataItem, RepoError> {
        let item = input.into_item(kind, new_item_id(), Utc::now());
        validate(&item)?;
        ensure_unique(store, &item).await?;

        set_json(store, &master_data_key(kind, &item.id), &item).await?;
        Ok(item)
    }

    /// Merge `input` into the stored item and persist it.
    ///
    /// The duplicate scan excludes the item itself, so saving an unchanged
    /// name is always accepted.
    pub async fn update(
        store: &dyn KvStore,
        kind: MasterDataType,
        id: &str,
        input: UpdateMasterData,
    ) -> Result<MasterDataUpdate, RepoError> {
        let previous = Self::find_by_id(store, kind, id)
            .await?
            .ok_or_else(|| not_found(kind, id))?;

        let mut item = previous.clone();
        input.apply_to(&mut item);
        validate(&item)?;
        ensure_unique(store, &item).await?;

        item.updated_at = Some(Utc::now());
        set_json(store, &master_data_key(kind, id), &item).await?;
        Ok(MasterDataUpdate { previous, item })
    }

    /// Remove an item, returning the deleted snapshot.
    ///
    /// Catalog records that mention the item by name are left as they are.
    pub async fn delete(
        store: &dyn KvStore,
        kind: MasterDataType,
        id: &str,
    ) -> Result<MasterDataItem, RepoError> {
        let item = Self::find_by_id(store, kind, id)
            .await?
            .ok_or_else(|| not_found(kind, id))?;
        store.del(&master_data_key(kind, id)).await?;
        Ok(item)
    }

    /// First item in `candidate`'s duplicate scope whose identifying name
    /// collides with it, ignoring `candidate` itself.
    pub async fn find_duplicate(
        store: &dyn KvStore,
        candidate: &MasterDataItem,
    ) -> Result<Option<MasterDataItem>, StoreError> {
        let identity = candidate.identity();
        let scope = candidate.kind.parent_scope();
        let parent = scope.and_then(|s| candidate.parent_id(s));

        let existing = Self::list_by_type(store, candidate.kind).await?;
        Ok(existing.into_iter().find(|other| {
            other.id != candidate.id
                && scope.map_or(true, |s| other.parent_id(s) == parent)
                && identity.collides_with(&other.identity())
        }))
    }
}

fn not_found(kind: MasterDataType, id: &str) -> RepoError {
    RepoError::Core(CoreError::NotFound {
        entity: kind.entity_label(),
        id: id.to_string(),
    })
}

/// Identifying name must be present; hierarchical types need their parent.
fn validate(item: &MasterDataItem) -> Result<(), CoreError> {
    let identity = item.identity();
    if identity.is_blank() {
        let field = match identity {
            Identity::Titles { .. } => "titleEn or titleJp",
            Identity::Name(_) => "name",
        };
        return Err(CoreError::Validation(format!(
            "{} requires a non-empty {field}",
            item.kind.entity_label()
        )));
    }

    if let Some(scope) = item.kind.parent_scope() {
        if item.parent_id(scope).map_or(true, |p| p.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "{} requires {}",
                item.kind.entity_label(),
                scope.field_name()
            )));
        }
    }
    Ok(())
}

async fn ensure_unique(store: &dyn KvStore, item: &MasterDataItem) -> Result<(), RepoError> {
    if let Some(existing) = MasterDataRepo::find_duplicate(store, item).await? {
        return Err(RepoError::Core(CoreError::DuplicateName {
            entity: item.kind.entity_label(),
            name: item.identity().display(),
            existing_id: existing.id,
        }));
    }
    Ok(())
}
