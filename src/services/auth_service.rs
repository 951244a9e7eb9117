//! Domain service for staff authentication.
//!
//! Handles PIN login and the public roster shown on the login screen.

use thiserror::Error;

use crate::domain::{IdentityId, Role};
use crate::models::Identity;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Login failed.")]
    UnknownIdentity,

    #[error("Incorrect PIN. Please try again.")]
    InvalidPin,

    #[error("{0}")]
    Validation(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for AuthError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Session(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies the PIN of an identity.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if the PIN is not four digits (no store call is made)
    /// - [`AuthError::UnknownIdentity`] if no such identity exists
    /// - [`AuthError::InvalidPin`] if the PIN does not match
    async fn login(&self, id: IdentityId, pin: &str) -> Result<Identity, AuthError>;

    /// Looks an identity up, e.g. to restore a session.
    async fn identity(&self, id: IdentityId) -> Result<Option<Identity>, AuthError>;

    /// Identities holding `role`, ordered by name.
    async fn roster(&self, role: Role) -> Result<Vec<Identity>, AuthError>;
}
