//! Typed store interface the core services depend on.
//!
//! `Store` is the production implementation. Services only see
//! `Arc<dyn OpsStore>`, so tests can substitute an instrumented double.

use anyhow::Result;
use async_trait::async_trait;

use super::Store;
use crate::domain::{BriefingId, IdentityId, LocationId, Role, ShiftId, TaskId};
use crate::models::{
    BriefingItem, Identity, Location, LocationTask, MaintenanceTicket, NewBriefing,
    NewLocationTask, NewMaintenanceTicket, NewRestockRequest, NewShift, NewWastageLog,
    OpenShiftOutcome, RestockRequest, Shift, TicketFeedEntry, WastageFeedEntry, WastageLog,
};

#[async_trait]
pub trait OpsStore: Send + Sync {
    // Identities and locations

    async fn find_identity(&self, id: IdentityId) -> Result<Option<Identity>>;

    /// Identity plus its stored PIN hash.
    async fn find_identity_secret(&self, id: IdentityId) -> Result<Option<(Identity, String)>>;

    async fn list_identities_by_role(&self, role: Role) -> Result<Vec<Identity>>;

    async fn list_locations(&self) -> Result<Vec<Location>>;

    async fn find_location(&self, id: LocationId) -> Result<Option<Location>>;

    // Shifts

    async fn find_open_shift(&self, bic_id: IdentityId) -> Result<Option<Shift>>;

    /// Inserts the shift and deactivates the read one-time briefing items as
    /// one unit of work.
    async fn open_shift(&self, shift: NewShift, consume: &[BriefingId]) -> Result<OpenShiftOutcome>;

    /// Conditional close. `false` if the shift was not open or not owned by `bic_id`.
    async fn close_shift(&self, id: ShiftId, bic_id: IdentityId) -> Result<bool>;

    // Briefings

    async fn list_active_briefings(&self, location_id: LocationId) -> Result<Vec<BriefingItem>>;

    async fn insert_briefings(&self, items: Vec<NewBriefing>) -> Result<Vec<BriefingItem>>;

    // Tasks

    async fn list_tasks(&self, location_id: LocationId) -> Result<Vec<LocationTask>>;

    async fn find_task(&self, id: TaskId) -> Result<Option<LocationTask>>;

    async fn insert_tasks(&self, tasks: Vec<NewLocationTask>) -> Result<Vec<LocationTask>>;

    async fn toggle_task(&self, id: TaskId) -> Result<Option<LocationTask>>;

    // Operational logs

    async fn insert_wastage(&self, entry: NewWastageLog) -> Result<WastageLog>;

    async fn list_wastage(&self, shift_id: ShiftId) -> Result<Vec<WastageLog>>;

    async fn insert_restock(&self, request: NewRestockRequest) -> Result<RestockRequest>;

    async fn list_restock(&self, shift_id: ShiftId) -> Result<Vec<RestockRequest>>;

    async fn insert_ticket(&self, ticket: NewMaintenanceTicket) -> Result<MaintenanceTicket>;

    async fn list_tickets(&self, location_id: LocationId) -> Result<Vec<MaintenanceTicket>>;

    /// Wastage logged in `[from, to)`.
    async fn wastage_feed(&self, from: &str, to: &str) -> Result<Vec<WastageFeedEntry>>;

    /// Tickets created in `[from, to)`.
    async fn ticket_feed(&self, from: &str, to: &str) -> Result<Vec<TicketFeedEntry>>;
}

#[async_trait]
impl OpsStore for Store {
    async fn find_identity(&self, id: IdentityId) -> Result<Option<Identity>> {
        self.identity_repo().get(id).await
    }

    async fn find_identity_secret(&self, id: IdentityId) -> Result<Option<(Identity, String)>> {
        self.identity_repo().get_with_secret(id).await
    }

    async fn list_identities_by_role(&self, role: Role) -> Result<Vec<Identity>> {
        self.identity_repo().list_by_role(role).await
    }

    async fn list_locations(&self) -> Result<Vec<Location>> {
        self.location_repo().list().await
    }

    async fn find_location(&self, id: LocationId) -> Result<Option<Location>> {
        self.location_repo().get(id).await
    }

    async fn find_open_shift(&self, bic_id: IdentityId) -> Result<Option<Shift>> {
        self.shift_repo().find_open(bic_id).await
    }

    async fn open_shift(&self, shift: NewShift, consume: &[BriefingId]) -> Result<OpenShiftOutcome> {
        self.shift_repo().open(shift, consume).await
    }

    async fn close_shift(&self, id: ShiftId, bic_id: IdentityId) -> Result<bool> {
        self.shift_repo().close(id, bic_id).await
    }

    async fn list_active_briefings(&self, location_id: LocationId) -> Result<Vec<BriefingItem>> {
        self.briefing_repo().list_active(location_id).await
    }

    async fn insert_briefings(&self, items: Vec<NewBriefing>) -> Result<Vec<BriefingItem>> {
        self.briefing_repo().insert_many(items).await
    }

    async fn list_tasks(&self, location_id: LocationId) -> Result<Vec<LocationTask>> {
        self.task_repo().list(location_id).await
    }

    async fn find_task(&self, id: TaskId) -> Result<Option<LocationTask>> {
        self.task_repo().get(id).await
    }

    async fn insert_tasks(&self, tasks: Vec<NewLocationTask>) -> Result<Vec<LocationTask>> {
        self.task_repo().insert_many(tasks).await
    }

    async fn toggle_task(&self, id: TaskId) -> Result<Option<LocationTask>> {
        self.task_repo().toggle(id).await
    }

    async fn insert_wastage(&self, entry: NewWastageLog) -> Result<WastageLog> {
        self.ops_log_repo().insert_wastage(entry).await
    }

    async fn list_wastage(&self, shift_id: ShiftId) -> Result<Vec<WastageLog>> {
        self.ops_log_repo().list_wastage(shift_id).await
    }

    async fn insert_restock(&self, request: NewRestockRequest) -> Result<RestockRequest> {
        self.ops_log_repo().insert_restock(request).await
    }

    async fn list_restock(&self, shift_id: ShiftId) -> Result<Vec<RestockRequest>> {
        self.ops_log_repo().list_restock(shift_id).await
    }

    async fn insert_ticket(&self, ticket: NewMaintenanceTicket) -> Result<MaintenanceTicket> {
        self.ops_log_repo().insert_ticket(ticket).await
    }

    async fn list_tickets(&self, location_id: LocationId) -> Result<Vec<MaintenanceTicket>> {
        self.ops_log_repo().list_tickets(location_id).await
    }

    async fn wastage_feed(&self, from: &str, to: &str) -> Result<Vec<WastageFeedEntry>> {
        self.ops_log_repo().wastage_feed(from, to).await
    }

    async fn ticket_feed(&self, from: &str, to: &str) -> Result<Vec<TicketFeedEntry>> {
        self.ops_log_repo().ticket_feed(from, to).await
    }
}
