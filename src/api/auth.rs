use axum::{
    Extension, Json,
    extract::{Query, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::parse_role;
use super::{
    ApiError, ApiResponse, AppState, LoginRequest, MessageResponse, NavigateQuery, RosterQuery,
    SessionDto,
};
use crate::domain::ShiftState;
use crate::models::Identity;
use crate::navigation::{self, Navigation};
use crate::services::SessionContext;

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the session token to an identity and stores it in the request
/// extensions. Requests without a valid session get a 401.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(identity) = state.session_store(session).restore().await? else {
        return Ok(ApiError::unauthorized().into_response());
    };

    tracing::Span::current().record("user_id", identity.id.value());
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

// ============================================================================
// Helpers
// ============================================================================

/// Builds the per-request context: identity plus its freshly read shift state.
pub(super) async fn session_context(
    state: &AppState,
    identity: Identity,
) -> Result<SessionContext, ApiError> {
    let shift = state.shift_service().refresh(identity.id).await?;
    Ok(SessionContext::new(identity, shift))
}

fn session_dto(context: SessionContext) -> SessionDto {
    let home = navigation::route(Some(&context.identity), &context.shift);
    SessionDto {
        identity: context.identity,
        shift: context.shift,
        home,
        home_path: home.path(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Verify the PIN of the chosen identity and open a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let identity = state
        .session_store(session)
        .login(payload.identity_id, &payload.pin)
        .await?;

    let context = session_context(&state, identity).await?;
    Ok(Json(ApiResponse::success(session_dto(context))))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.session_store(session).logout().await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    })))
}

/// GET /auth/me
/// Restore the session after a reload.
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let context = session_context(&state, identity).await?;
    Ok(Json(ApiResponse::success(session_dto(context))))
}

/// GET /roster?role=barista
/// Public: the login screen lists names before anyone is authenticated.
pub async fn roster(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<ApiResponse<Vec<Identity>>>, ApiError> {
    let role = parse_role(&query.role)?;
    let identities = state.auth_service().roster(role).await?;
    Ok(Json(ApiResponse::success(identities)))
}

/// GET /navigate?path=/dashboard
/// Which screen the caller may see for the requested path. Works signed out.
pub async fn navigate(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<NavigateQuery>,
) -> Result<Json<ApiResponse<Navigation>>, ApiError> {
    let navigation = match state.session_store(session).restore().await? {
        Some(identity) => {
            let context = session_context(&state, identity).await?;
            navigation::resolve(Some(&context.identity), &context.shift, &query.path)
        }
        None => navigation::resolve(None, &ShiftState::NoShift, &query.path),
    };

    Ok(Json(ApiResponse::success(navigation)))
}
