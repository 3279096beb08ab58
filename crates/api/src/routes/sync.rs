use axum::routing::post;
use axum::Router;

use crate::handlers::sync;
use crate::state::AppState;

/// Sync routes mounted at `/sync`.
///
/// ```text
/// POST   /rename              -> propagate_rename
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/rename", post(sync::propagate_rename))
}
