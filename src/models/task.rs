use serde::{Deserialize, Serialize};

use crate::domain::{LocationId, TaskCategory, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTask {
    pub id: TaskId,
    pub location_id: LocationId,
    pub task_text: String,
    pub category: TaskCategory,
    pub assigned_by: String,
    pub is_completed: bool,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewLocationTask {
    pub location_id: LocationId,
    pub task_text: String,
    pub category: TaskCategory,
    pub assigned_by: String,
}
