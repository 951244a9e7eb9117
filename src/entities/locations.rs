use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shifts::Entity")]
    Shifts,
    #[sea_orm(has_many = "super::briefing_items::Entity")]
    BriefingItems,
    #[sea_orm(has_many = "super::location_tasks::Entity")]
    LocationTasks,
    #[sea_orm(has_many = "super::maintenance_tickets::Entity")]
    MaintenanceTickets,
}

impl Related<super::shifts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shifts.def()
    }
}

impl Related<super::briefing_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BriefingItems.def()
    }
}

impl Related<super::location_tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LocationTasks.def()
    }
}

impl Related<super::maintenance_tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaintenanceTickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
