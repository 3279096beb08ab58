//! Handlers for the `/master-data/{type}` resource.
//!
//! Plain CRUD returns `{ data }`. The `/sync` update additionally rewrites
//! catalog records that mention a renamed item and returns `{ data, sync }`.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use mediadex_core::error::CoreError;
use mediadex_core::master_data::MasterDataType;
use mediadex_db::models::master_data::{CreateMasterData, UpdateMasterData};
use mediadex_db::repositories::MasterDataRepo;
use mediadex_db::sync::SyncDispatcher;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::response::{DataResponse, SyncedDataResponse};
use crate::state::AppState;

fn parse_type(raw: &str) -> AppResult<MasterDataType> {
    MasterDataType::from_str_value(raw).map_err(AppError::BadRequest)
}

/// GET /api/v1/master-data/{type}
pub async fn list(
    State(state): State<AppState>,
    Path(item_type): Path<String>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_type(&item_type)?;
    let items = MasterDataRepo::list_by_type(state.store(), kind).await?;

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/master-data/{type}/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((item_type, id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_type(&item_type)?;
    let item = MasterDataRepo::find_by_id(state.store(), kind, &id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: kind.entity_label(),
                id: id.clone(),
            })
        })?;

    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/master-data/{type}
pub async fn create(
    State(state): State<AppState>,
    Path(item_type): Path<String>,
    ApiJson(input): ApiJson<CreateMasterData>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_type(&item_type)?;
    let item = MasterDataRepo::create(state.store(), kind, input).await?;

    tracing::info!(item_type = %kind, item_id = %item.id, "Master data created");

    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/master-data/{type}/{id}
///
/// Updates the item only. Catalog records are not touched.
pub async fn update(
    State(state): State<AppState>,
    Path((item_type, id)): Path<(String, String)>,
    ApiJson(input): ApiJson<UpdateMasterData>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_type(&item_type)?;
    let updated = MasterDataRepo::update(state.store(), kind, &id, input).await?;

    tracing::info!(item_type = %kind, item_id = %id, "Master data updated");

    Ok(Json(DataResponse { data: updated.item }))
}

/// PUT /api/v1/master-data/{type}/{id}/sync
///
/// Updates the item, then propagates a rename into catalog records.
/// Propagation problems never fail the request; they show up as lower
/// counts in `sync`.
pub async fn update_with_sync(
    State(state): State<AppState>,
    Path((item_type, id)): Path<(String, String)>,
    ApiJson(input): ApiJson<UpdateMasterData>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_type(&item_type)?;
    let result = SyncDispatcher::new(state.store())
        .with_page_size(state.config.scan_page_size)
        .update_with_sync(kind, &id, input)
        .await?;

    Ok(Json(SyncedDataResponse {
        data: result.item,
        sync: result.sync,
    }))
}

/// DELETE /api/v1/master-data/{type}/{id}
///
/// Returns the deleted item. Catalog references to its name are kept.
pub async fn delete(
    State(state): State<AppState>,
    Path((item_type, id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_type(&item_type)?;
    let deleted = MasterDataRepo::delete(state.store(), kind, &id).await?;

    tracing::info!(item_type = %kind, item_id = %id, "Master data deleted");

    Ok(Json(DataResponse { data: deleted }))
}
