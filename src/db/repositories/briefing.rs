use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::parse_column;
use crate::domain::{BriefingId, LocationId, Recurrence};
use crate::entities::{briefing_items, prelude::*};
use crate::models::{BriefingItem, NewBriefing, now_timestamp};

pub struct BriefingRepository {
    conn: DatabaseConnection,
}

impl BriefingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: briefing_items::Model) -> Result<BriefingItem> {
        Ok(BriefingItem {
            id: BriefingId::new(model.id),
            location_id: LocationId::new(model.location_id),
            recurrence: parse_column(&model.recurrence)?,
            content: model.content,
            is_active: model.is_active,
            created_by_name: model.created_by_name,
            created_at: model.created_at,
        })
    }

    /// Active items at a location, newest first.
    pub async fn list_active(&self, location_id: LocationId) -> Result<Vec<BriefingItem>> {
        let rows = BriefingItems::find()
            .filter(briefing_items::Column::LocationId.eq(location_id.value()))
            .filter(briefing_items::Column::IsActive.eq(true))
            .order_by_desc(briefing_items::Column::CreatedAt)
            .order_by_desc(briefing_items::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list briefing items")?;

        rows.into_iter().map(Self::map_model).collect()
    }

    /// Inserts one row per item. All rows land or none do.
    pub async fn insert_many(&self, items: Vec<NewBriefing>) -> Result<Vec<BriefingItem>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let created_at = now_timestamp();
        let txn = self.conn.begin().await?;
        let mut inserted = Vec::with_capacity(items.len());

        for item in items {
            let model = briefing_items::ActiveModel {
                location_id: Set(item.location_id.value()),
                content: Set(item.content),
                recurrence: Set(item.recurrence.as_str().to_string()),
                is_active: Set(true),
                created_by_name: Set(item.created_by_name),
                created_at: Set(created_at.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .context("Failed to insert briefing item")?;

            inserted.push(Self::map_model(model)?);
        }

        txn.commit().await?;

        info!("Inserted {} briefing item(s)", inserted.len());
        Ok(inserted)
    }

    /// Deactivates the read items at `location_id` whose recurrence is `once`.
    ///
    /// Ids of recurring items, inactive items or other locations are ignored.
    /// Runs on whatever connection it is given, normally the shift-start
    /// transaction. Returns the number of items consumed.
    pub async fn consume_one_time<C: ConnectionTrait>(
        conn: &C,
        location_id: LocationId,
        read: &[BriefingId],
    ) -> Result<u64> {
        if read.is_empty() {
            return Ok(0);
        }

        let ids: Vec<i32> = read.iter().map(|id| id.value()).collect();
        let result = BriefingItems::update_many()
            .col_expr(
                briefing_items::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .filter(briefing_items::Column::Id.is_in(ids))
            .filter(briefing_items::Column::LocationId.eq(location_id.value()))
            .filter(briefing_items::Column::Recurrence.eq(Recurrence::Once.as_str()))
            .filter(briefing_items::Column::IsActive.eq(true))
            .exec(conn)
            .await
            .context("Failed to consume one-time briefing items")?;

        Ok(result.rows_affected)
    }
}
