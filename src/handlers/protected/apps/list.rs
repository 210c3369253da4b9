use axum::{extract::State, Json};
use tracing::debug;

use crate::api::AppListResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /apps - every API-enabled app with its key
pub async fn get(State(state): State<AppState>) -> Result<Json<AppListResponse>, ApiError> {
    let apps = state
        .store
        .list_enabled_apps()
        .await
        .map_err(|e| state.database_error(e))?;

    debug!("Listing {} apps", apps.len());
    Ok(Json(AppListResponse::from(apps)))
}
