use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "restock_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub shift_id: i32,

    pub item_name: String,

    pub quantity: i32,

    pub notes: Option<String>,

    pub requested_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shifts::Entity",
        from = "Column::ShiftId",
        to = "super::shifts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Shifts,
}

impl Related<super::shifts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shifts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
