//! Per-request view of the authenticated identity.
//!
//! The durable token is the identity id kept in the tower session, which a
//! SQLite-backed session store persists across restarts. Nothing is cached in
//! process memory between requests.

use std::sync::Arc;

use serde::Serialize;
use tower_sessions::Session;
use tracing::{debug, info};

use crate::domain::{IdentityId, ShiftState};
use crate::models::Identity;
use crate::services::auth_service::{AuthError, AuthService};

/// Session key holding the authenticated identity id.
pub const IDENTITY_KEY: &str = "identity_id";

pub struct SessionStore {
    session: Session,
    auth: Arc<dyn AuthService>,
}

impl SessionStore {
    #[must_use]
    pub fn new(session: Session, auth: Arc<dyn AuthService>) -> Self {
        Self { session, auth }
    }

    /// Identity behind the session token, if it still exists.
    ///
    /// A token pointing at a removed identity is cleared.
    pub async fn restore(&self) -> Result<Option<Identity>, AuthError> {
        let Some(id) = self.session.get::<IdentityId>(IDENTITY_KEY).await? else {
            return Ok(None);
        };

        match self.auth.identity(id).await? {
            Some(identity) => Ok(Some(identity)),
            None => {
                debug!(identity_id = %id, "Dropping session token of removed identity");
                self.session.remove::<IdentityId>(IDENTITY_KEY).await?;
                Ok(None)
            }
        }
    }

    /// Verifies the PIN and binds the identity to a fresh session id.
    pub async fn login(&self, id: IdentityId, pin: &str) -> Result<Identity, AuthError> {
        let identity = self.auth.login(id, pin).await?;

        self.session.cycle_id().await?;
        self.session.insert(IDENTITY_KEY, identity.id).await?;

        info!(identity_id = %identity.id, "Session opened");
        Ok(identity)
    }

    /// Drops the token and everything else stored in the session.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session.flush().await?;
        Ok(())
    }
}

/// Identity and shift state resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    pub identity: Identity,
    pub shift: ShiftState,
}

impl SessionContext {
    #[must_use]
    pub const fn new(identity: Identity, shift: ShiftState) -> Self {
        Self { identity, shift }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::services::DefaultAuthService;
    use crate::test_support::{TestDb, cheap_security};
    use tower_sessions::MemoryStore;

    #[tokio::test]
    async fn login_survives_a_reload() {
        let db = TestDb::new().await;
        let amani = db
            .store
            .create_identity("Amani", Role::Barista, "2468", &cheap_security())
            .await
            .unwrap();
        let auth: Arc<dyn AuthService> = Arc::new(DefaultAuthService::new(db.ops_store()));
        let backing = Arc::new(MemoryStore::default());

        let session = Session::new(None, backing.clone(), None);
        let sessions = SessionStore::new(session.clone(), auth.clone());
        assert_eq!(sessions.restore().await.unwrap(), None);

        let identity = sessions.login(amani.id, "2468").await.unwrap();
        session.save().await.unwrap();
        let session_id = session.id().expect("saved session has an id");

        let reloaded = SessionStore::new(Session::new(Some(session_id), backing, None), auth);
        assert_eq!(reloaded.restore().await.unwrap(), Some(identity));
    }

    #[tokio::test]
    async fn failed_login_leaves_the_session_empty() {
        let db = TestDb::new().await;
        let amani = db
            .store
            .create_identity("Amani", Role::Barista, "2468", &cheap_security())
            .await
            .unwrap();
        let auth: Arc<dyn AuthService> = Arc::new(DefaultAuthService::new(db.ops_store()));
        let sessions = SessionStore::new(
            Session::new(None, Arc::new(MemoryStore::default()), None),
            auth,
        );

        assert!(matches!(
            sessions.login(amani.id, "0000").await,
            Err(AuthError::InvalidPin)
        ));
        assert_eq!(sessions.restore().await.unwrap(), None);
    }

    #[tokio::test]
    async fn logout_clears_the_identity() {
        let db = TestDb::new().await;
        let amani = db
            .store
            .create_identity("Amani", Role::Barista, "2468", &cheap_security())
            .await
            .unwrap();
        let auth: Arc<dyn AuthService> = Arc::new(DefaultAuthService::new(db.ops_store()));
        let sessions = SessionStore::new(
            Session::new(None, Arc::new(MemoryStore::default()), None),
            auth,
        );

        sessions.login(amani.id, "2468").await.unwrap();
        assert!(sessions.restore().await.unwrap().is_some());

        sessions.logout().await.unwrap();
        assert_eq!(sessions.restore().await.unwrap(), None);
    }
}
