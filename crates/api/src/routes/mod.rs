pub mod health;
pub mod master_data;
pub mod sync;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /master-data/{type}                  list, create
/// /master-data/{type}/{id}             get, update, delete
/// /master-data/{type}/{id}/sync        update with rename propagation (PUT)
///
/// /sync/rename                         re-run rename propagation (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/master-data", master_data::router())
        .nest("/sync", sync::router())
}
