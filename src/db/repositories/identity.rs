use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::parse_column;
use crate::config::SecurityConfig;
use crate::domain::{IdentityId, Role};
use crate::entities::{prelude::*, profiles};
use crate::models::Identity;

pub struct IdentityRepository {
    conn: DatabaseConnection,
}

impl IdentityRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: profiles::Model) -> Result<Identity> {
        Ok(Identity {
            id: IdentityId::new(model.id),
            role: parse_column(&model.role)?,
            name: model.name,
        })
    }

    pub async fn get(&self, id: IdentityId) -> Result<Option<Identity>> {
        let row = Profiles::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query profile by ID")?;

        row.map(Self::map_model).transpose()
    }

    /// Profile together with its PIN hash, for credential checks only.
    pub async fn get_with_secret(&self, id: IdentityId) -> Result<Option<(Identity, String)>> {
        let row = Profiles::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query profile for PIN verification")?;

        row.map(|model| {
            let pin_hash = model.pin_hash.clone();
            Self::map_model(model).map(|identity| (identity, pin_hash))
        })
        .transpose()
    }

    pub async fn list_by_role(&self, role: Role) -> Result<Vec<Identity>> {
        let rows = Profiles::find()
            .filter(profiles::Column::Role.eq(role.as_str()))
            .order_by_asc(profiles::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list profiles by role")?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn list_all(&self) -> Result<Vec<Identity>> {
        let rows = Profiles::find()
            .order_by_asc(profiles::Column::Role)
            .order_by_asc(profiles::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list profiles")?;

        rows.into_iter().map(Self::map_model).collect()
    }

    /// Creates a profile. The PIN is hashed before it touches the database.
    pub async fn create(
        &self,
        name: &str,
        role: Role,
        pin: &str,
        config: &SecurityConfig,
    ) -> Result<Identity> {
        let pin = pin.to_string();
        let config = config.clone();
        let pin_hash = tokio::task::spawn_blocking(move || hash_pin(&pin, Some(&config)))
            .await
            .context("PIN hashing task panicked")??;

        let model = profiles::ActiveModel {
            name: Set(name.to_string()),
            role: Set(role.as_str().to_string()),
            pin_hash: Set(pin_hash),
            created_at: Set(crate::models::now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert profile")?;

        info!("Created {} profile '{}' (ID: {})", role, model.name, model.id);
        Self::map_model(model)
    }
}

/// Hash a PIN using Argon2id with optional custom params.
pub fn hash_pin(pin: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(pin.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash PIN: {e}"))?;

    Ok(hash.to_string())
}

/// Checks a PIN against a stored PHC hash. CPU-bound; call from a blocking task.
pub fn verify_pin(pin: &str, pin_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(pin_hash)
        .map_err(|e| anyhow::anyhow!("Invalid PIN hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(pin.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_params() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    #[test]
    fn pin_hash_verifies_only_the_same_pin() {
        let hash = hash_pin("4821", Some(&cheap_params())).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_pin("4821", &hash).unwrap());
        assert!(!verify_pin("4822", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_pin("1234", "not-a-hash").is_err());
    }
}
