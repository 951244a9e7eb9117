//! Store-backed implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::OpsStore;
use crate::db::repositories::identity::verify_pin;
use crate::domain::{IdentityId, Role};
use crate::models::Identity;
use crate::services::auth_service::{AuthError, AuthService};
use crate::services::validation::validate_pin;

pub struct DefaultAuthService {
    store: Arc<dyn OpsStore>,
}

impl DefaultAuthService {
    #[must_use]
    pub fn new(store: Arc<dyn OpsStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for DefaultAuthService {
    async fn login(&self, id: IdentityId, pin: &str) -> Result<Identity, AuthError> {
        validate_pin(pin).map_err(AuthError::Validation)?;

        let Some((identity, pin_hash)) = self.store.find_identity_secret(id).await? else {
            warn!(identity_id = %id, "Login attempt for unknown identity");
            metrics::counter!("auth_logins_total", "outcome" => "unknown_identity").increment(1);
            return Err(AuthError::UnknownIdentity);
        };

        let pin = pin.to_string();
        let verified = tokio::task::spawn_blocking(move || verify_pin(&pin, &pin_hash))
            .await
            .map_err(|e| AuthError::Internal(format!("PIN verification task failed: {e}")))??;

        if !verified {
            warn!(identity_id = %id, "Incorrect PIN");
            metrics::counter!("auth_logins_total", "outcome" => "invalid_pin").increment(1);
            return Err(AuthError::InvalidPin);
        }

        info!(identity_id = %id, role = %identity.role, "Login succeeded");
        metrics::counter!("auth_logins_total", "outcome" => "success").increment(1);
        Ok(identity)
    }

    async fn identity(&self, id: IdentityId) -> Result<Option<Identity>, AuthError> {
        Ok(self.store.find_identity(id).await?)
    }

    async fn roster(&self, role: Role) -> Result<Vec<Identity>, AuthError> {
        Ok(self.store.list_identities_by_role(role).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TestDb, cheap_security, spy::SpyStore};

    #[tokio::test]
    async fn wrong_pin_and_unknown_identity_fail_differently() {
        let db = TestDb::new().await;
        let amani = db
            .store
            .create_identity("Amani", Role::Barista, "2468", &cheap_security())
            .await
            .unwrap();
        let service = DefaultAuthService::new(db.ops_store());

        let wrong = service.login(amani.id, "1357").await.unwrap_err();
        let unknown = service.login(IdentityId::new(999), "2468").await.unwrap_err();

        assert!(matches!(wrong, AuthError::InvalidPin));
        assert!(matches!(unknown, AuthError::UnknownIdentity));
        assert_ne!(wrong.to_string(), unknown.to_string());

        let ok = service.login(amani.id, "2468").await.unwrap();
        assert_eq!(ok, amani);
    }

    #[tokio::test]
    async fn malformed_pin_never_reaches_the_store() {
        let spy = SpyStore::shared();
        let service = DefaultAuthService::new(spy.clone());

        let err = service.login(IdentityId::new(1), "12a4").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn roster_is_filtered_by_role_and_sorted() {
        let db = TestDb::new().await;
        let security = cheap_security();
        db.store.create_identity("Zawadi", Role::Barista, "1111", &security).await.unwrap();
        db.store.create_identity("Baraka", Role::Barista, "2222", &security).await.unwrap();
        db.store.create_identity("Wanjiru", Role::Manager, "3333", &security).await.unwrap();

        let service = DefaultAuthService::new(db.ops_store());
        let names: Vec<String> = service
            .roster(Role::Barista)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();

        assert_eq!(names, vec!["Baraka", "Zawadi"]);
    }
}
