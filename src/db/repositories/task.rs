use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use super::parse_column;
use crate::domain::{LocationId, TaskId};
use crate::entities::{location_tasks, prelude::*};
use crate::models::{LocationTask, NewLocationTask, now_timestamp};

pub struct TaskRepository {
    conn: DatabaseConnection,
}

impl TaskRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: location_tasks::Model) -> Result<LocationTask> {
        Ok(LocationTask {
            id: TaskId::new(model.id),
            location_id: LocationId::new(model.location_id),
            category: parse_column(&model.category)?,
            task_text: model.task_text,
            assigned_by: model.assigned_by,
            is_completed: model.is_completed,
            created_at: model.created_at,
        })
    }

    pub async fn get(&self, id: TaskId) -> Result<Option<LocationTask>> {
        let row = LocationTasks::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query task")?;

        row.map(Self::map_model).transpose()
    }

    /// All tasks at a location, newest first.
    pub async fn list(&self, location_id: LocationId) -> Result<Vec<LocationTask>> {
        let rows = LocationTasks::find()
            .filter(location_tasks::Column::LocationId.eq(location_id.value()))
            .order_by_desc(location_tasks::Column::CreatedAt)
            .order_by_desc(location_tasks::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list tasks")?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn insert_many(&self, tasks: Vec<NewLocationTask>) -> Result<Vec<LocationTask>> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let created_at = now_timestamp();
        let txn = self.conn.begin().await?;
        let mut inserted = Vec::with_capacity(tasks.len());

        for task in tasks {
            let model = location_tasks::ActiveModel {
                location_id: Set(task.location_id.value()),
                task_text: Set(task.task_text),
                category: Set(task.category.as_str().to_string()),
                assigned_by: Set(task.assigned_by),
                is_completed: Set(false),
                created_at: Set(created_at.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .context("Failed to insert task")?;

            inserted.push(Self::map_model(model)?);
        }

        txn.commit().await?;

        info!("Dispatched {} task(s)", inserted.len());
        Ok(inserted)
    }

    /// Flips `is_completed`. Returns the updated task, or `None` if it does not exist.
    pub async fn toggle(&self, id: TaskId) -> Result<Option<LocationTask>> {
        let txn = self.conn.begin().await?;

        let Some(model) = LocationTasks::find_by_id(id.value())
            .one(&txn)
            .await
            .context("Failed to query task")?
        else {
            txn.rollback().await?;
            return Ok(None);
        };

        let completed = !model.is_completed;
        let mut active: location_tasks::ActiveModel = model.into();
        active.is_completed = Set(completed);
        let updated = active
            .update(&txn)
            .await
            .context("Failed to toggle task")?;

        txn.commit().await?;

        debug!(task_id = %id, completed, "Task toggled");
        Self::map_model(updated).map(Some)
    }
}
