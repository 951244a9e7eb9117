use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // A barista can be in charge of at most one open shift. Partial index,
        // so closed shifts do not collide.
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_shifts_one_open_per_bic ON shifts(bic_id) WHERE end_time IS NULL",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_shifts_one_open_per_bic")
            .await?;

        Ok(())
    }
}
