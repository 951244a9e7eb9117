use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

use super::parse_column;
use crate::domain::{LocationId, ShiftId, TicketStatus};
use crate::entities::{
    locations, maintenance_tickets, prelude::*, restock_requests, shifts, wastage_logs,
};
use crate::models::{
    MaintenanceTicket, NewMaintenanceTicket, NewRestockRequest, NewWastageLog, RestockRequest,
    TicketFeedEntry, WastageFeedEntry, WastageLog, now_timestamp,
};

/// Append-only operational logs: wastage, restock requests, maintenance tickets.
pub struct OpsLogRepository {
    conn: DatabaseConnection,
}

fn map_wastage(model: wastage_logs::Model) -> WastageLog {
    WastageLog {
        id: model.id,
        shift_id: ShiftId::new(model.shift_id),
        item_type: model.item_type,
        item_name: model.item_name,
        quantity: model.quantity,
        reason: model.reason,
        logged_at: model.logged_at,
    }
}

fn map_restock(model: restock_requests::Model) -> RestockRequest {
    RestockRequest {
        id: model.id,
        shift_id: ShiftId::new(model.shift_id),
        item_name: model.item_name,
        quantity: model.quantity,
        notes: model.notes,
        requested_at: model.requested_at,
    }
}

fn map_ticket(model: maintenance_tickets::Model) -> Result<MaintenanceTicket> {
    Ok(MaintenanceTicket {
        id: model.id,
        location_id: LocationId::new(model.location_id),
        status: parse_column(&model.status)?,
        equipment: model.equipment,
        description: model.description,
        reported_by: model.reported_by,
        created_at: model.created_at,
    })
}

impl OpsLogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert_wastage(&self, entry: NewWastageLog) -> Result<WastageLog> {
        let model = wastage_logs::ActiveModel {
            shift_id: Set(entry.shift_id.value()),
            item_type: Set(entry.item_type),
            item_name: Set(entry.item_name),
            quantity: Set(entry.quantity),
            reason: Set(entry.reason),
            logged_at: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert wastage log")?;

        Ok(map_wastage(model))
    }

    /// Wastage for one shift, newest first.
    pub async fn list_wastage(&self, shift_id: ShiftId) -> Result<Vec<WastageLog>> {
        let rows = WastageLogs::find()
            .filter(wastage_logs::Column::ShiftId.eq(shift_id.value()))
            .order_by_desc(wastage_logs::Column::LoggedAt)
            .order_by_desc(wastage_logs::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list wastage logs")?;

        Ok(rows.into_iter().map(map_wastage).collect())
    }

    pub async fn insert_restock(&self, request: NewRestockRequest) -> Result<RestockRequest> {
        let model = restock_requests::ActiveModel {
            shift_id: Set(request.shift_id.value()),
            item_name: Set(request.item_name),
            quantity: Set(request.quantity),
            notes: Set(request.notes),
            requested_at: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert restock request")?;

        Ok(map_restock(model))
    }

    pub async fn list_restock(&self, shift_id: ShiftId) -> Result<Vec<RestockRequest>> {
        let rows = RestockRequests::find()
            .filter(restock_requests::Column::ShiftId.eq(shift_id.value()))
            .order_by_desc(restock_requests::Column::RequestedAt)
            .order_by_desc(restock_requests::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list restock requests")?;

        Ok(rows.into_iter().map(map_restock).collect())
    }

    pub async fn insert_ticket(&self, ticket: NewMaintenanceTicket) -> Result<MaintenanceTicket> {
        let model = maintenance_tickets::ActiveModel {
            location_id: Set(ticket.location_id.value()),
            equipment: Set(ticket.equipment),
            description: Set(ticket.description),
            reported_by: Set(ticket.reported_by),
            status: Set(TicketStatus::Open.as_str().to_string()),
            created_at: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert maintenance ticket")?;

        map_ticket(model)
    }

    pub async fn list_tickets(&self, location_id: LocationId) -> Result<Vec<MaintenanceTicket>> {
        let rows = MaintenanceTickets::find()
            .filter(maintenance_tickets::Column::LocationId.eq(location_id.value()))
            .order_by_desc(maintenance_tickets::Column::CreatedAt)
            .order_by_desc(maintenance_tickets::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list maintenance tickets")?;

        rows.into_iter().map(map_ticket).collect()
    }

    /// Wastage logged in `[from, to)`, newest first, with the name of the
    /// location the owning shift ran at.
    pub async fn wastage_feed(&self, from: &str, to: &str) -> Result<Vec<WastageFeedEntry>> {
        let rows = WastageLogs::find()
            .find_also_related(Shifts)
            .filter(wastage_logs::Column::LoggedAt.gte(from))
            .filter(wastage_logs::Column::LoggedAt.lt(to))
            .order_by_desc(wastage_logs::Column::LoggedAt)
            .order_by_desc(wastage_logs::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query wastage feed")?;

        let location_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, shift)| shift.as_ref().map(|s| s.location_id))
            .collect();
        let names = self.location_names(location_ids).await?;

        Ok(rows
            .into_iter()
            .map(|(log, shift): (wastage_logs::Model, Option<shifts::Model>)| {
                let location_name = shift.and_then(|s| names.get(&s.location_id).cloned());
                WastageFeedEntry {
                    log: map_wastage(log),
                    location_name,
                }
            })
            .collect())
    }

    /// Tickets opened in `[from, to)`, newest first.
    pub async fn ticket_feed(&self, from: &str, to: &str) -> Result<Vec<TicketFeedEntry>> {
        let rows = MaintenanceTickets::find()
            .find_also_related(Locations)
            .filter(maintenance_tickets::Column::CreatedAt.gte(from))
            .filter(maintenance_tickets::Column::CreatedAt.lt(to))
            .order_by_desc(maintenance_tickets::Column::CreatedAt)
            .order_by_desc(maintenance_tickets::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query maintenance feed")?;

        rows.into_iter()
            .map(|(ticket, location)| {
                Ok(TicketFeedEntry {
                    ticket: map_ticket(ticket)?,
                    location_name: location.map(|l| l.name),
                })
            })
            .collect()
    }

    async fn location_names(&self, mut ids: Vec<i32>) -> Result<HashMap<i32, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        ids.sort_unstable();
        ids.dedup();

        let rows = Locations::find()
            .filter(locations::Column::Id.is_in(ids))
            .all(&self.conn)
            .await
            .context("Failed to resolve location names")?;

        Ok(rows.into_iter().map(|l| (l.id, l.name)).collect())
    }
}
