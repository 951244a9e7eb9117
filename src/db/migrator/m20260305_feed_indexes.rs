use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, &str); 5] = [
    (
        "idx_briefing_items_location_active",
        "briefing_items(location_id, is_active)",
    ),
    ("idx_location_tasks_location", "location_tasks(location_id)"),
    ("idx_wastage_logs_logged_at", "wastage_logs(logged_at)"),
    (
        "idx_maintenance_tickets_created_at",
        "maintenance_tickets(created_at)",
    ),
    ("idx_restock_requests_shift", "restock_requests(shift_id)"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (name, target) in INDEXES {
            conn.execute_unprepared(&format!("CREATE INDEX IF NOT EXISTS {name} ON {target}"))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (name, _) in INDEXES {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS {name}"))
                .await?;
        }

        Ok(())
    }
}
