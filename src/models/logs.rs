use serde::{Deserialize, Serialize};

use crate::domain::{LocationId, ShiftId, TicketStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WastageLog {
    pub id: i32,
    pub shift_id: ShiftId,
    pub item_type: String,
    pub item_name: String,
    pub quantity: i32,
    pub reason: String,
    pub logged_at: String,
}

#[derive(Debug, Clone)]
pub struct NewWastageLog {
    pub shift_id: ShiftId,
    pub item_type: String,
    pub item_name: String,
    pub quantity: i32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockRequest {
    pub id: i32,
    pub shift_id: ShiftId,
    pub item_name: String,
    pub quantity: i32,
    pub notes: Option<String>,
    pub requested_at: String,
}

#[derive(Debug, Clone)]
pub struct NewRestockRequest {
    pub shift_id: ShiftId,
    pub item_name: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceTicket {
    pub id: i32,
    pub location_id: LocationId,
    pub equipment: String,
    pub description: String,
    pub reported_by: String,
    pub status: TicketStatus,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewMaintenanceTicket {
    pub location_id: LocationId,
    pub equipment: String,
    pub description: String,
    pub reported_by: String,
}

/// Wastage row joined with the name of the location its shift ran at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WastageFeedEntry {
    #[serde(flatten)]
    pub log: WastageLog,
    pub location_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketFeedEntry {
    #[serde(flatten)]
    pub ticket: MaintenanceTicket,
    pub location_name: Option<String>,
}
