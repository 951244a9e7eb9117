use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::{OpsStore, Store};
use crate::services::{
    AuthService, BriefingService, DefaultAuthService, DefaultBriefingService, DefaultOpsService,
    DefaultShiftService, OpsService, ShiftService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub shift_service: Arc<dyn ShiftService>,

    pub briefing_service: Arc<dyn BriefingService>,

    pub ops_service: Arc<dyn OpsService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires every service onto an already connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let ops_store: Arc<dyn OpsStore> = Arc::new(store.clone());

        Self {
            config: Arc::new(RwLock::new(config)),
            auth_service: Arc::new(DefaultAuthService::new(ops_store.clone())),
            shift_service: Arc::new(DefaultShiftService::new(ops_store.clone())),
            briefing_service: Arc::new(DefaultBriefingService::new(ops_store.clone())),
            ops_service: Arc::new(DefaultOpsService::new(ops_store)),
            store,
        }
    }
}
