use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Referenced tables first so the foreign keys resolve.
        create(manager, &schema, Locations).await?;
        create(manager, &schema, Profiles).await?;
        create(manager, &schema, Shifts).await?;
        create(manager, &schema, BriefingItems).await?;
        create(manager, &schema, LocationTasks).await?;
        create(manager, &schema, WastageLogs).await?;
        create(manager, &schema, RestockRequests).await?;
        create(manager, &schema, MaintenanceTickets).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaintenanceTickets).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RestockRequests).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WastageLogs).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LocationTasks).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BriefingItems).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Shifts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations).to_owned())
            .await?;

        Ok(())
    }
}
