//! Shared harness: a router over a throwaway database with seeded staff.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use shiftflow::api::AppState;
use shiftflow::config::{Config, SecurityConfig};
use shiftflow::domain::Role;
use tower::ServiceExt;

pub const PIN: &str = "1234";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.db_path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

fn cheap_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    }
}

pub async fn spawn_app() -> TestApp {
    let db_path =
        std::env::temp_dir().join(format!("shiftflow-api-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.general.max_db_connections = 2;
    config.security = cheap_security();
    config.server.secure_cookies = false;

    let state = shiftflow::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = shiftflow::api::router(state.clone())
        .await
        .expect("Failed to build router");

    TestApp {
        router,
        state,
        db_path,
    }
}

impl TestApp {
    pub async fn seed_location(&self, name: &str) -> i32 {
        self.state
            .store()
            .create_location(name)
            .await
            .unwrap()
            .id
            .value()
    }

    pub async fn seed_identity(&self, name: &str, role: Role) -> i32 {
        self.state
            .store()
            .create_identity(name, role, PIN, &cheap_security())
            .await
            .unwrap()
            .id
            .value()
    }

    /// Sends a request and returns the status plus the decoded JSON body.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let (status, _, json) = self.send_raw(method, uri, cookie, body).await;
        (status, json)
    }

    async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Option<String>, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, set_cookie, json)
    }

    /// Logs in with the shared test PIN and returns the session cookie.
    pub async fn login(&self, identity_id: i32) -> String {
        let (status, cookie, body) = self
            .send_raw(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "identity_id": identity_id, "pin": PIN })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        cookie.expect("login should set a session cookie")
    }
}

pub fn all_checks() -> serde_json::Value {
    serde_json::json!({ "pos": true, "wifi": true, "payment": true, "cash_float": true })
}
