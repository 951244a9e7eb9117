//! Domain service for the shift lifecycle of a barista.
//!
//! `NoShift -> Open -> NoShift`, one open shift per identity. Starting a shift
//! consumes the one-time briefing items the barista just read.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{BriefingId, IdentityId, LocationId, ShiftId, ShiftState, SystemChecks};
use crate::models::{Identity, Location};

#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("A shift is already open (shift {0})")]
    AlreadyOpen(ShiftId),

    #[error("No open shift with that id")]
    NotOpen,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ShiftError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ShiftError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Everything the opening wizard collects before a shift can start.
#[derive(Debug, Clone, Deserialize)]
pub struct StartShift {
    pub location_id: LocationId,

    #[serde(default)]
    pub systems: SystemChecks,

    #[serde(default)]
    pub briefing_acknowledged: bool,

    /// Briefing items shown to the barista. `None` means whatever is active
    /// at the location right now.
    #[serde(default)]
    pub briefing_item_ids: Option<Vec<BriefingId>>,
}

#[async_trait::async_trait]
pub trait ShiftService: Send + Sync {
    /// Current shift state of an identity. Idempotent.
    async fn refresh(&self, identity_id: IdentityId) -> Result<ShiftState, ShiftError>;

    /// Opens a shift and consumes the read one-time briefing items atomically.
    ///
    /// # Errors
    ///
    /// - [`ShiftError::Validation`] for non-baristas, unticked checks or an
    ///   unacknowledged briefing (before any store call)
    /// - [`ShiftError::NotFound`] for an unknown location
    /// - [`ShiftError::AlreadyOpen`] if the identity already has an open shift
    async fn start(&self, identity: &Identity, request: StartShift)
    -> Result<ShiftState, ShiftError>;

    /// Closes the identity's open shift.
    ///
    /// # Errors
    ///
    /// Returns [`ShiftError::NotOpen`] unless `shift_id` is the identity's open shift.
    async fn end(&self, identity: &Identity, shift_id: ShiftId) -> Result<ShiftState, ShiftError>;

    /// Locations a shift can be opened at, ordered by name.
    async fn locations(&self) -> Result<Vec<Location>, ShiftError>;
}
