use sea_orm_migration::prelude::*;

mod m20260301_initial;
mod m20260302_one_open_shift_per_bic;
mod m20260305_feed_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_initial::Migration),
            Box::new(m20260302_one_open_shift_per_bic::Migration),
            Box::new(m20260305_feed_indexes::Migration),
        ]
    }
}
