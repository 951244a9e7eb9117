use serde::{Deserialize, Serialize};

use crate::domain::{BroadcastTarget, IdentityId, Recurrence, ShiftId, ShiftState, TaskCategory};
use crate::models::Identity;
use crate::navigation::Screen;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identity_id: IdentityId,
    pub pin: String,
}

/// Who is signed in, their shift state and where they should land.
#[derive(Debug, Serialize)]
pub struct SessionDto {
    pub identity: Identity,
    pub shift: ShiftState,
    pub home: Screen,
    pub home_path: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct NavigateQuery {
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "/".to_string()
}

#[derive(Debug, Deserialize)]
pub struct EndShiftRequest {
    pub shift_id: ShiftId,
}

#[derive(Debug, Deserialize)]
pub struct PostBriefingRequest {
    pub target: BroadcastTarget,
    pub content: String,
    #[serde(default = "default_recurrence")]
    pub recurrence: Recurrence,
}

const fn default_recurrence() -> Recurrence {
    Recurrence::Recurring
}

#[derive(Debug, Deserialize)]
pub struct DispatchTaskRequest {
    pub target: BroadcastTarget,
    pub task_text: String,
    #[serde(default)]
    pub category: TaskCategory,
}

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
    pub uptime_seconds: u64,
}
