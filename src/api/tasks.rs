use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, DispatchTaskRequest};
use crate::domain::{LocationId, TaskId};
use crate::models::{Identity, LocationTask};

/// GET /locations/{id}/tasks
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<LocationTask>>>, ApiError> {
    let location_id = LocationId::new(validate_id("location", location_id)?);
    let tasks = state.ops_service().list_tasks(location_id).await?;
    Ok(Json(ApiResponse::success(tasks)))
}

/// POST /tasks
pub async fn dispatch_task(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<DispatchTaskRequest>,
) -> Result<Json<ApiResponse<Vec<LocationTask>>>, ApiError> {
    let tasks = state
        .ops_service()
        .dispatch_tasks(
            &identity,
            payload.target,
            &payload.task_text,
            payload.category,
        )
        .await?;
    Ok(Json(ApiResponse::success(tasks)))
}

/// POST /tasks/{id}/toggle
/// Returns the full, freshly read task list of the task's location.
pub async fn toggle_task(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(task_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<LocationTask>>>, ApiError> {
    let task_id = TaskId::new(validate_id("task", task_id)?);
    let tasks = state.ops_service().toggle_task(&identity, task_id).await?;
    Ok(Json(ApiResponse::success(tasks)))
}
