//! Operational log endpoints used from the barista dashboard.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState};
use crate::domain::LocationId;
use crate::models::{Identity, MaintenanceTicket, RestockRequest, WastageLog};
use crate::services::{MaintenanceInput, RestockInput, WastageInput};

/// GET /wastage
pub async fn list_wastage(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ApiResponse<Vec<WastageLog>>>, ApiError> {
    let logs = state.ops_service().list_wastage(&identity).await?;
    Ok(Json(ApiResponse::success(logs)))
}

/// POST /wastage
pub async fn log_wastage(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<WastageInput>,
) -> Result<Json<ApiResponse<WastageLog>>, ApiError> {
    let log = state.ops_service().log_wastage(&identity, payload).await?;
    Ok(Json(ApiResponse::success(log)))
}

/// GET /restock
pub async fn list_restock(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ApiResponse<Vec<RestockRequest>>>, ApiError> {
    let requests = state.ops_service().list_restock(&identity).await?;
    Ok(Json(ApiResponse::success(requests)))
}

/// POST /restock
pub async fn request_restock(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<RestockInput>,
) -> Result<Json<ApiResponse<RestockRequest>>, ApiError> {
    let request = state
        .ops_service()
        .request_restock(&identity, payload)
        .await?;
    Ok(Json(ApiResponse::success(request)))
}

/// POST /maintenance
pub async fn report_maintenance(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<MaintenanceInput>,
) -> Result<Json<ApiResponse<MaintenanceTicket>>, ApiError> {
    let ticket = state
        .ops_service()
        .report_maintenance(&identity, payload)
        .await?;
    Ok(Json(ApiResponse::success(ticket)))
}

/// GET /locations/{id}/maintenance
pub async fn list_maintenance(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<MaintenanceTicket>>>, ApiError> {
    let location_id = LocationId::new(validate_id("location", location_id)?);
    let tickets = state.ops_service().list_maintenance(location_id).await?;
    Ok(Json(ApiResponse::success(tickets)))
}
