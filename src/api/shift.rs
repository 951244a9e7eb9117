use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, EndShiftRequest};
use crate::domain::ShiftState;
use crate::models::{Identity, Location};
use crate::services::StartShift;

/// GET /locations
pub async fn list_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Location>>>, ApiError> {
    let locations = state.shift_service().locations().await?;
    Ok(Json(ApiResponse::success(locations)))
}

/// GET /shift
pub async fn current_shift(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ApiResponse<ShiftState>>, ApiError> {
    let shift = state.shift_service().refresh(identity.id).await?;
    Ok(Json(ApiResponse::success(shift)))
}

/// POST /shift/start
/// Finish the opening wizard: location, system checks, briefing read.
pub async fn start_shift(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<StartShift>,
) -> Result<Json<ApiResponse<ShiftState>>, ApiError> {
    let shift = state.shift_service().start(&identity, payload).await?;
    Ok(Json(ApiResponse::success(shift)))
}

/// POST /shift/end
pub async fn end_shift(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<EndShiftRequest>,
) -> Result<Json<ApiResponse<ShiftState>>, ApiError> {
    let shift = state
        .shift_service()
        .end(&identity, payload.shift_id)
        .await?;
    Ok(Json(ApiResponse::success(shift)))
}
