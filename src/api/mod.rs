use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::info;

use crate::config::Config;
use crate::services::{
    AuthService, BriefingService, OpsService, SessionStore, ShiftService,
};
use crate::state::SharedState;

mod audit;
pub mod auth;
mod briefings;
mod error;
mod logs;
mod observability;
mod shift;
mod system;
mod tasks;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn shift_service(&self) -> &Arc<dyn ShiftService> {
        &self.shared.shift_service
    }

    #[must_use]
    pub fn briefing_service(&self) -> &Arc<dyn BriefingService> {
        &self.shared.briefing_service
    }

    #[must_use]
    pub fn ops_service(&self) -> &Arc<dyn OpsService> {
        &self.shared.ops_service
    }

    /// Session store bound to the session of the current request.
    #[must_use]
    pub fn session_store(&self, session: tower_sessions::Session) -> SessionStore {
        SessionStore::new(session, self.shared.auth_service.clone())
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let server = state.config().read().await.server.clone();

    // Sessions live in the application database so they survive restarts.
    let session_store = SqliteStore::new(state.store().conn.get_sqlite_connection_pool().clone());
    session_store.migrate().await?;
    if let Err(e) = session_store.delete_expired().await {
        tracing::warn!("Failed to purge expired sessions: {e}");
    }

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )));

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/roster", get(auth::roster))
        .route("/navigate", get(auth::navigate))
        .route("/health", get(system::health))
        .layer(session_layer)
        .with_state(state.clone());

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    info!(
        "API routes ready (session inactivity: {} min, request timeout: {}s)",
        server.session_inactivity_minutes, server.request_timeout_seconds
    );

    Ok(Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(system::metrics))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds),
        ))
        // Inside `TraceLayer` so `auth_middleware` records `user_id` on this span.
        .layer(middleware::from_fn(observability::track_requests))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http()))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/locations", get(shift::list_locations))
        .route("/shift", get(shift::current_shift))
        .route("/shift/start", post(shift::start_shift))
        .route("/shift/end", post(shift::end_shift))
        .route(
            "/locations/{id}/briefings",
            get(briefings::list_briefings),
        )
        .route("/briefings", post(briefings::post_briefing))
        .route("/locations/{id}/tasks", get(tasks::list_tasks))
        .route("/tasks", post(tasks::dispatch_task))
        .route("/tasks/{id}/toggle", post(tasks::toggle_task))
        .route("/wastage", get(logs::list_wastage).post(logs::log_wastage))
        .route(
            "/restock",
            get(logs::list_restock).post(logs::request_restock),
        )
        .route("/maintenance", post(logs::report_maintenance))
        .route(
            "/locations/{id}/maintenance",
            get(logs::list_maintenance),
        )
        .route("/audit", get(audit::get_audit))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
