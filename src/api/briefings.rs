use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, PostBriefingRequest};
use crate::domain::LocationId;
use crate::models::{BriefingItem, Identity};

/// GET /locations/{id}/briefings
pub async fn list_briefings(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<BriefingItem>>>, ApiError> {
    let location_id = LocationId::new(validate_id("location", location_id)?);
    let items = state.briefing_service().list_active(location_id).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// POST /briefings
/// Broadcast from the communications screen to one location or all of them.
pub async fn post_briefing(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<PostBriefingRequest>,
) -> Result<Json<ApiResponse<Vec<BriefingItem>>>, ApiError> {
    let items = state
        .briefing_service()
        .post(
            &identity,
            payload.target,
            &payload.content,
            payload.recurrence,
        )
        .await?;
    Ok(Json(ApiResponse::success(items)))
}
