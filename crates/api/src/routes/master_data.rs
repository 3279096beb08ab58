//! Route definitions for master data.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::master_data;
use crate::state::AppState;

/// Master data routes mounted at `/master-data`.
///
/// ```text
/// GET    /{type}              -> list
/// POST   /{type}              -> create
/// GET    /{type}/{id}         -> get_by_id
/// PUT    /{type}/{id}         -> update
/// DELETE /{type}/{id}         -> delete
/// PUT    /{type}/{id}/sync    -> update_with_sync
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{type}", get(master_data::list).post(master_data::create))
        .route(
            "/{type}/{id}",
            get(master_data::get_by_id)
                .put(master_data::update)
                .delete(master_data::delete),
        )
        .route("/{type}/{id}/sync", put(master_data::update_with_sync))
}
