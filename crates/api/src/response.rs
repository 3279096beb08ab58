//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Sync-aware updates
//! add a `sync` report next to it.

use mediadex_core::sync::SyncReport;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "sync": { recordsUpdated, secondaryRecordsUpdated } }`.
#[derive(Debug, Serialize)]
pub struct SyncedDataResponse<T: Serialize> {
    pub data: T,
    pub sync: SyncReport,
}
