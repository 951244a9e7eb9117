//! Domain service for the operational logs a shift produces (wastage,
//! restock requests, maintenance tickets), location tasks, and the daily
//! audit feed read by managers and core staff.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{BroadcastTarget, LocationId, TaskCategory, TaskId};
use crate::models::{
    Identity, LocationTask, MaintenanceTicket, RestockRequest, TicketFeedEntry, WastageFeedEntry,
    WastageLog,
};

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Start a shift first")]
    NoOpenShift,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for OpsError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for OpsError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WastageInput {
    pub item_type: String,
    pub item_name: String,
    pub quantity: i32,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestockInput {
    pub item_name: String,
    pub quantity: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceInput {
    pub equipment: String,
    pub description: String,
}

/// One UTC day of activity across every location.
#[derive(Debug, Clone, Serialize)]
pub struct AuditFeed {
    pub date: NaiveDate,
    pub wastage: Vec<WastageFeedEntry>,
    pub maintenance: Vec<TicketFeedEntry>,
}

#[async_trait::async_trait]
pub trait OpsService: Send + Sync {
    /// Logs wastage against the caller's open shift.
    async fn log_wastage(&self, actor: &Identity, input: WastageInput) -> Result<WastageLog, OpsError>;

    /// Wastage of the caller's open shift, newest first. Empty without a shift.
    async fn list_wastage(&self, actor: &Identity) -> Result<Vec<WastageLog>, OpsError>;

    async fn request_restock(
        &self,
        actor: &Identity,
        input: RestockInput,
    ) -> Result<RestockRequest, OpsError>;

    async fn list_restock(&self, actor: &Identity) -> Result<Vec<RestockRequest>, OpsError>;

    /// Opens a ticket at the location of the caller's open shift.
    async fn report_maintenance(
        &self,
        actor: &Identity,
        input: MaintenanceInput,
    ) -> Result<MaintenanceTicket, OpsError>;

    async fn list_maintenance(&self, location_id: LocationId)
    -> Result<Vec<MaintenanceTicket>, OpsError>;

    async fn list_tasks(&self, location_id: LocationId) -> Result<Vec<LocationTask>, OpsError>;

    /// Manager/core only. One task per target location.
    async fn dispatch_tasks(
        &self,
        author: &Identity,
        target: BroadcastTarget,
        text: &str,
        category: TaskCategory,
    ) -> Result<Vec<LocationTask>, OpsError>;

    /// Flips completion and returns the freshly read task list of the task's location.
    ///
    /// # Errors
    ///
    /// - [`OpsError::NotFound`] for an unknown task
    /// - [`OpsError::NoOpenShift`] for a barista without an open shift
    /// - [`OpsError::Forbidden`] for a barista whose shift runs elsewhere
    async fn toggle_task(&self, actor: &Identity, task_id: TaskId)
    -> Result<Vec<LocationTask>, OpsError>;

    /// Manager/core only. `None` means today (UTC).
    async fn audit(&self, actor: &Identity, date: Option<NaiveDate>) -> Result<AuditFeed, OpsError>;
}
