use axum::{
    Extension, Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::validation::parse_date;
use super::{ApiError, ApiResponse, AppState, AuditQuery};
use crate::models::Identity;
use crate::services::AuditFeed;

/// GET /audit?date=YYYY-MM-DD
/// Wastage and maintenance across all locations for one UTC day (default today).
pub async fn get_audit(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<ApiResponse<AuditFeed>>, ApiError> {
    let date = parse_date(query.date.as_deref())?;
    let feed = state.ops_service().audit(&identity, date).await?;
    Ok(Json(ApiResponse::success(feed)))
}
