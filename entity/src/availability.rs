use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One bookable window for a doctor. `(doctor_id, date, start_time, end_time)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "availability")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub is_available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::doctor::Entity",
        from = "Column::DoctorId",
        to   = "super::doctor::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Doctor,
}

impl Related<super::doctor::Entity> for Entity {
    fn to() -> RelationDef { Relation::Doctor.def() }
}

impl ActiveModelBehavior for ActiveModel {}
