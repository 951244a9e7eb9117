//! Domain service for briefing items: what a barista reads before opening,
//! and the broadcasts managers and core staff send out.

use thiserror::Error;

use crate::domain::{BroadcastTarget, LocationId, Recurrence};
use crate::models::{BriefingItem, Identity};

#[derive(Debug, Error)]
pub enum BriefingError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for BriefingError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BriefingError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait BriefingService: Send + Sync {
    /// Active items for a location, newest first.
    async fn list_active(&self, location_id: LocationId) -> Result<Vec<BriefingItem>, BriefingError>;

    /// Posts one item per target location.
    ///
    /// # Errors
    ///
    /// - [`BriefingError::Forbidden`] unless the author is a manager or core
    /// - [`BriefingError::Validation`] for blank content
    /// - [`BriefingError::NotFound`] for an unknown target location
    async fn post(
        &self,
        author: &Identity,
        target: BroadcastTarget,
        content: &str,
        recurrence: Recurrence,
    ) -> Result<Vec<BriefingItem>, BriefingError>;
}
