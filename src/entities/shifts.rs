use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shifts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub location_id: i32,

    /// Barista in charge. At most one row per `bic_id` may have a NULL `end_time`.
    pub bic_id: i32,

    pub start_time: String,

    pub end_time: Option<String>,

    pub cash_float_verified: bool,

    pub briefing_completed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Locations,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::BicId",
        to = "super::profiles::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Profiles,
    #[sea_orm(has_many = "super::wastage_logs::Entity")]
    WastageLogs,
    #[sea_orm(has_many = "super::restock_requests::Entity")]
    RestockRequests,
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locations.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::wastage_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WastageLogs.def()
    }
}

impl Related<super::restock_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestockRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
