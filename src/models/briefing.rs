use serde::{Deserialize, Serialize};

use crate::domain::{BriefingId, LocationId, Recurrence};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefingItem {
    pub id: BriefingId,
    pub location_id: LocationId,
    pub content: String,
    pub recurrence: Recurrence,
    pub is_active: bool,
    pub created_by_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewBriefing {
    pub location_id: LocationId,
    pub content: String,
    pub recurrence: Recurrence,
    pub created_by_name: String,
}
