//! Key layout of the key-value namespace.
//!
//! Each prefix acts as a table. Keep all key construction here so a
//! partition can later move to an indexed store without touching callers.

use crate::master_data::MasterDataType;

/// Root prefix for all master data partitions.
pub const MASTER_DATA_PREFIX: &str = "master:";

/// Primary catalog records ("movies").
pub const CATALOG_PREFIX: &str = "movie:";

/// Secondary catalog records ("SC movies").
pub const SECONDARY_CATALOG_PREFIX: &str = "scmovie:";

/// Prefix of one master data partition, e.g. `master:actress:`.
pub fn master_data_partition(kind: MasterDataType) -> String {
    format!("{MASTER_DATA_PREFIX}{}:", kind.as_str())
}

pub fn master_data_key(kind: MasterDataType, id: &str) -> String {
    format!("{}{id}", master_data_partition(kind))
}

pub fn catalog_key(id: &str) -> String {
    format!("{CATALOG_PREFIX}{id}")
}

pub fn secondary_catalog_key(id: &str) -> String {
    format!("{SECONDARY_CATALOG_PREFIX}{id}")
}
