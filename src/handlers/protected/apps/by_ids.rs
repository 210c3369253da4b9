use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use tracing::debug;

use crate::api::{normalize_ids, parse_id_list, AppDataResponse, IdsBody, IdsQuery};
use crate::error::ApiError;
use crate::state::AppState;

const IDS_REQUIRED: &str = "ids parameter is required";
const IDS_EMPTY: &str = "ids must contain at least one id";

/// GET /apps/by-ids?ids=a,b,c
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<IdsQuery>, QueryRejection>,
) -> Result<Json<AppDataResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let raw = query.ids.ok_or_else(|| ApiError::bad_request(IDS_REQUIRED))?;
    lookup(&state, parse_id_list(&raw)).await
}

/// POST /apps/by-ids with `{"ids": [...]}`
pub async fn post(
    State(state): State<AppState>,
    body: Result<Json<IdsBody>, JsonRejection>,
) -> Result<Json<AppDataResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let ids = body.ids.ok_or_else(|| ApiError::bad_request(IDS_REQUIRED))?;
    lookup(&state, normalize_ids(&ids)).await
}

async fn lookup(state: &AppState, ids: Vec<String>) -> Result<Json<AppDataResponse>, ApiError> {
    if ids.is_empty() {
        return Err(ApiError::bad_request(IDS_EMPTY));
    }

    let data = state
        .store
        .find_apps_by_ids(&ids)
        .await
        .map_err(|e| state.database_error(e))?;

    debug!("Resolved {} of {} requested ids", data.len(), ids.len());
    Ok(Json(AppDataResponse { data }))
}
