use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::Role;
use crate::models::{Identity, Location};

pub mod migrator;
pub mod ops_store;
pub mod repositories;

pub use ops_store::OpsStore;

/// `SQLite` store behind every service. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !is_in_memory(db_url) {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.ok();
                }
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn identity_repo(&self) -> repositories::identity::IdentityRepository {
        repositories::identity::IdentityRepository::new(self.conn.clone())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn shift_repo(&self) -> repositories::shift::ShiftRepository {
        repositories::shift::ShiftRepository::new(self.conn.clone())
    }

    fn briefing_repo(&self) -> repositories::briefing::BriefingRepository {
        repositories::briefing::BriefingRepository::new(self.conn.clone())
    }

    fn task_repo(&self) -> repositories::task::TaskRepository {
        repositories::task::TaskRepository::new(self.conn.clone())
    }

    fn ops_log_repo(&self) -> repositories::logs::OpsLogRepository {
        repositories::logs::OpsLogRepository::new(self.conn.clone())
    }

    // ========== Administration (CLI only) ==========

    pub async fn create_identity(
        &self,
        name: &str,
        role: Role,
        pin: &str,
        security: &SecurityConfig,
    ) -> Result<Identity> {
        self.identity_repo().create(name, role, pin, security).await
    }

    pub async fn list_all_identities(&self) -> Result<Vec<Identity>> {
        self.identity_repo().list_all().await
    }

    pub async fn create_location(&self, name: &str) -> Result<Location> {
        self.location_repo().create(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::is_in_memory;

    #[test]
    fn memory_urls_skip_file_creation() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory(":memory:"));
        assert!(is_in_memory("sqlite://file:db1?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite:data/shiftflow.db"));
    }
}
