use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::db::OpsStore;
use crate::domain::{BroadcastTarget, LocationId, TaskCategory, TaskId};
use crate::models::{
    Identity, LocationTask, MaintenanceTicket, NewLocationTask, NewMaintenanceTicket,
    NewRestockRequest, NewWastageLog, RestockRequest, Shift, WastageLog,
};
use crate::services::briefing_service_impl::{author_name, target_locations};
use crate::services::ops_service::{
    AuditFeed, MaintenanceInput, OpsError, OpsService, RestockInput, WastageInput,
};
use crate::services::validation::{optional_text, require_positive, require_text};

/// Recorded as `assigned_by` when the dispatcher has no usable display name.
const FALLBACK_DISPATCHER: &str = "Core";

pub struct DefaultOpsService {
    store: Arc<dyn OpsStore>,
}

impl DefaultOpsService {
    #[must_use]
    pub fn new(store: Arc<dyn OpsStore>) -> Self {
        Self { store }
    }

    async fn open_shift_of(&self, actor: &Identity) -> Result<Shift, OpsError> {
        self.store
            .find_open_shift(actor.id)
            .await?
            .ok_or(OpsError::NoOpenShift)
    }

    fn require_lead(actor: &Identity, action: &str) -> Result<(), OpsError> {
        if actor.role.is_lead() {
            Ok(())
        } else {
            Err(OpsError::Forbidden(format!(
                "Only managers and core staff can {action}"
            )))
        }
    }
}

/// `[start, end)` bounds of a UTC day in the stored timestamp format.
fn day_bounds(date: NaiveDate) -> (String, String) {
    let next = date.succ_opt().unwrap_or(NaiveDate::MAX);
    let fmt = |d: NaiveDate| format!("{}T00:00:00.000Z", d.format("%Y-%m-%d"));
    (fmt(date), fmt(next))
}

fn invalid(message: String) -> OpsError {
    OpsError::Validation(message)
}

#[async_trait]
impl OpsService for DefaultOpsService {
    async fn log_wastage(
        &self,
        actor: &Identity,
        input: WastageInput,
    ) -> Result<WastageLog, OpsError> {
        let item_type = require_text("Item type", &input.item_type).map_err(invalid)?;
        let item_name = require_text("Item name", &input.item_name).map_err(invalid)?;
        let reason = require_text("Reason", &input.reason).map_err(invalid)?;
        let quantity = require_positive("Quantity", input.quantity).map_err(invalid)?;

        let shift = self.open_shift_of(actor).await?;
        let log = self
            .store
            .insert_wastage(NewWastageLog {
                shift_id: shift.id,
                item_type,
                item_name,
                quantity,
                reason,
            })
            .await?;

        info!(shift_id = %shift.id, item = %log.item_name, quantity, "Wastage logged");
        metrics::counter!("ops_records_total", "kind" => "wastage").increment(1);
        Ok(log)
    }

    async fn list_wastage(&self, actor: &Identity) -> Result<Vec<WastageLog>, OpsError> {
        match self.store.find_open_shift(actor.id).await? {
            Some(shift) => Ok(self.store.list_wastage(shift.id).await?),
            None => Ok(Vec::new()),
        }
    }

    async fn request_restock(
        &self,
        actor: &Identity,
        input: RestockInput,
    ) -> Result<RestockRequest, OpsError> {
        let item_name = require_text("Item name", &input.item_name).map_err(invalid)?;
        let quantity = require_positive("Quantity", input.quantity).map_err(invalid)?;
        let notes = optional_text(input.notes.as_deref());

        let shift = self.open_shift_of(actor).await?;
        let request = self
            .store
            .insert_restock(NewRestockRequest {
                shift_id: shift.id,
                item_name,
                quantity,
                notes,
            })
            .await?;

        info!(shift_id = %shift.id, item = %request.item_name, quantity, "Restock requested");
        metrics::counter!("ops_records_total", "kind" => "restock").increment(1);
        Ok(request)
    }

    async fn list_restock(&self, actor: &Identity) -> Result<Vec<RestockRequest>, OpsError> {
        match self.store.find_open_shift(actor.id).await? {
            Some(shift) => Ok(self.store.list_restock(shift.id).await?),
            None => Ok(Vec::new()),
        }
    }

    async fn report_maintenance(
        &self,
        actor: &Identity,
        input: MaintenanceInput,
    ) -> Result<MaintenanceTicket, OpsError> {
        let equipment = require_text("Equipment", &input.equipment).map_err(invalid)?;
        let description = require_text("Description", &input.description).map_err(invalid)?;

        let shift = self.open_shift_of(actor).await?;
        let ticket = self
            .store
            .insert_ticket(NewMaintenanceTicket {
                location_id: shift.location_id,
                equipment,
                description,
                reported_by: actor.name.clone(),
            })
            .await?;

        info!(
            location_id = %ticket.location_id,
            equipment = %ticket.equipment,
            "Maintenance ticket opened"
        );
        metrics::counter!("ops_records_total", "kind" => "maintenance").increment(1);
        Ok(ticket)
    }

    async fn list_maintenance(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<MaintenanceTicket>, OpsError> {
        Ok(self.store.list_tickets(location_id).await?)
    }

    async fn list_tasks(&self, location_id: LocationId) -> Result<Vec<LocationTask>, OpsError> {
        Ok(self.store.list_tasks(location_id).await?)
    }

    async fn dispatch_tasks(
        &self,
        author: &Identity,
        target: BroadcastTarget,
        text: &str,
        category: TaskCategory,
    ) -> Result<Vec<LocationTask>, OpsError> {
        Self::require_lead(author, "dispatch tasks")?;
        let task_text = require_text("Task", text).map_err(invalid)?;

        let locations = target_locations(self.store.as_ref(), target)
            .await?
            .ok_or_else(|| OpsError::NotFound(format!("Location {target:?}")))?;

        let assigned_by = author_name(author, FALLBACK_DISPATCHER);
        let tasks = locations
            .iter()
            .map(|location| NewLocationTask {
                location_id: location.id,
                task_text: task_text.clone(),
                category,
                assigned_by: assigned_by.clone(),
            })
            .collect();

        let dispatched = self.store.insert_tasks(tasks).await?;
        info!(author_id = %author.id, %category, "Task dispatched to {} location(s)", dispatched.len());
        Ok(dispatched)
    }

    async fn toggle_task(
        &self,
        actor: &Identity,
        task_id: TaskId,
    ) -> Result<Vec<LocationTask>, OpsError> {
        let task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or_else(|| OpsError::NotFound(format!("Task {task_id}")))?;

        if !actor.role.is_lead() {
            let shift = self.open_shift_of(actor).await?;
            if shift.location_id != task.location_id {
                return Err(OpsError::Forbidden(
                    "Tasks can only be updated at the location of your shift".to_string(),
                ));
            }
        }

        let toggled = self
            .store
            .toggle_task(task_id)
            .await?
            .ok_or_else(|| OpsError::NotFound(format!("Task {task_id}")))?;

        info!(task_id = %task_id, completed = toggled.is_completed, "Task toggled");
        Ok(self.store.list_tasks(toggled.location_id).await?)
    }

    async fn audit(
        &self,
        actor: &Identity,
        date: Option<NaiveDate>,
    ) -> Result<AuditFeed, OpsError> {
        Self::require_lead(actor, "read the audit feed")?;

        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        let (from, to) = day_bounds(date);

        let wastage = self.store.wastage_feed(&from, &to).await?;
        let maintenance = self.store.ticket_feed(&from, &to).await?;

        Ok(AuditFeed {
            date,
            wastage,
            maintenance,
        })
    }
}
