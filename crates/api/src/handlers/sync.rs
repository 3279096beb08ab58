//! Handler for manually re-running rename propagation.
//!
//! Useful when an earlier propagation left stale names behind, for
//! instance after a store outage mid-scan.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mediadex_core::sync::PropagationKind;
use mediadex_db::sync::RenamePropagator;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /sync/rename`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub kind: String,
    pub old_name: String,
    pub new_name: String,
}

/// POST /api/v1/sync/rename
pub async fn propagate_rename(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RenameRequest>,
) -> AppResult<impl IntoResponse> {
    let kind = PropagationKind::from_str_value(&input.kind).map_err(AppError::BadRequest)?;
    if input.old_name.trim().is_empty() || input.new_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "oldName and newName must not be empty".into(),
        ));
    }

    let report = RenamePropagator::new(state.store())
        .with_page_size(state.config.scan_page_size)
        .propagate(kind, &input.old_name, &input.new_name)
        .await;

    Ok(Json(DataResponse { data: report }))
}
