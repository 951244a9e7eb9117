use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::domain::LocationId;
use crate::entities::{locations, prelude::*};
use crate::models::Location;

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: locations::Model) -> Location {
        Location {
            id: LocationId::new(model.id),
            name: model.name,
        }
    }

    pub async fn get(&self, id: LocationId) -> Result<Option<Location>> {
        let row = Locations::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query location")?;

        Ok(row.map(Self::map_model))
    }

    pub async fn list(&self) -> Result<Vec<Location>> {
        let rows = Locations::find()
            .order_by_asc(locations::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list locations")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn create(&self, name: &str) -> Result<Location> {
        let model = locations::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .with_context(|| format!("Failed to insert location '{name}'"))?;

        info!("Created location '{}' (ID: {})", model.name, model.id);
        Ok(Self::map_model(model))
    }
}
