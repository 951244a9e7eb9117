//! Fixtures for unit tests: throwaway databases and an instrumented store.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::SecurityConfig;
use crate::db::{OpsStore, Store};

/// A migrated `SQLite` database in a temp file, removed on drop.
pub struct TestDb {
    pub store: Store,
    path: PathBuf,
}

impl TestDb {
    pub async fn new() -> Self {
        let path = std::env::temp_dir().join(format!("shiftflow-test-{}.db", uuid::Uuid::new_v4()));
        let store = Store::with_pool_options(&format!("sqlite:{}", path.display()), 2, 1)
            .await
            .expect("test database should open");
        Self { store, path }
    }

    pub fn ops_store(&self) -> Arc<dyn OpsStore> {
        Arc::new(self.store.clone())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

/// Argon2 parameters cheap enough for tests.
pub fn cheap_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    }
}

pub mod spy {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::Result;
    use async_trait::async_trait;

    use crate::db::OpsStore;
    use crate::domain::{BriefingId, IdentityId, LocationId, Role, ShiftId, TaskId};
    use crate::models::{
        BriefingItem, Identity, Location, LocationTask, MaintenanceTicket, NewBriefing,
        NewLocationTask, NewMaintenanceTicket, NewRestockRequest, NewShift, NewWastageLog,
        OpenShiftOutcome, RestockRequest, Shift, TicketFeedEntry, WastageFeedEntry, WastageLog,
    };

    /// Store double that records how often it was touched and fails every
    /// call. Used to prove validation happens before any store access.
    #[derive(Default)]
    pub struct SpyStore {
        calls: AtomicUsize,
    }

    impl SpyStore {
        pub fn shared() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn hit<T>(&self, op: &str) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("spy store does not serve {op}")
        }
    }

    #[async_trait]
    impl OpsStore for SpyStore {
        async fn find_identity(&self, _: IdentityId) -> Result<Option<Identity>> {
            self.hit("find_identity")
        }
        async fn find_identity_secret(&self, _: IdentityId) -> Result<Option<(Identity, String)>> {
            self.hit("find_identity_secret")
        }
        async fn list_identities_by_role(&self, _: Role) -> Result<Vec<Identity>> {
            self.hit("list_identities_by_role")
        }
        async fn list_locations(&self) -> Result<Vec<Location>> {
            self.hit("list_locations")
        }
        async fn find_location(&self, _: LocationId) -> Result<Option<Location>> {
            self.hit("find_location")
        }
        async fn find_open_shift(&self, _: IdentityId) -> Result<Option<Shift>> {
            self.hit("find_open_shift")
        }
        async fn open_shift(&self, _: NewShift, _: &[BriefingId]) -> Result<OpenShiftOutcome> {
            self.hit("open_shift")
        }
        async fn close_shift(&self, _: ShiftId, _: IdentityId) -> Result<bool> {
            self.hit("close_shift")
        }
        async fn list_active_briefings(&self, _: LocationId) -> Result<Vec<BriefingItem>> {
            self.hit("list_active_briefings")
        }
        async fn insert_briefings(&self, _: Vec<NewBriefing>) -> Result<Vec<BriefingItem>> {
            self.hit("insert_briefings")
        }
        async fn list_tasks(&self, _: LocationId) -> Result<Vec<LocationTask>> {
            self.hit("list_tasks")
        }
        async fn find_task(&self, _: TaskId) -> Result<Option<LocationTask>> {
            self.hit("find_task")
        }
        async fn insert_tasks(&self, _: Vec<NewLocationTask>) -> Result<Vec<LocationTask>> {
            self.hit("insert_tasks")
        }
        async fn toggle_task(&self, _: TaskId) -> Result<Option<LocationTask>> {
            self.hit("toggle_task")
        }
        async fn insert_wastage(&self, _: NewWastageLog) -> Result<WastageLog> {
            self.hit("insert_wastage")
        }
        async fn list_wastage(&self, _: ShiftId) -> Result<Vec<WastageLog>> {
            self.hit("list_wastage")
        }
        async fn insert_restock(&self, _: NewRestockRequest) -> Result<RestockRequest> {
            self.hit("insert_restock")
        }
        async fn list_restock(&self, _: ShiftId) -> Result<Vec<RestockRequest>> {
            self.hit("list_restock")
        }
        async fn insert_ticket(&self, _: NewMaintenanceTicket) -> Result<MaintenanceTicket> {
            self.hit("insert_ticket")
        }
        async fn list_tickets(&self, _: LocationId) -> Result<Vec<MaintenanceTicket>> {
            self.hit("list_tickets")
        }
        async fn wastage_feed(&self, _: &str, _: &str) -> Result<Vec<WastageFeedEntry>> {
            self.hit("wastage_feed")
        }
        async fn ticket_feed(&self, _: &str, _: &str) -> Result<Vec<TicketFeedEntry>> {
            self.hit("ticket_feed")
        }
    }
}
