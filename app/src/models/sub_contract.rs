use sea_orm::entity::prelude::*;
use serde::Serialize;

use super::status::WorkStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sub_contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub task_id: String,
    #[sea_orm(column_type = "Text")]
    pub subcontract_brief: String,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub weightage: Decimal,
    pub status: WorkStatus,
    pub due_date: Date,
    pub assignee_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub completion_percentage: Decimal,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::task::Entity",
        from = "Column::TaskId",
        to = "super::task::Column::Id",
        on_delete = "Cascade"
    )]
    Task,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::AssigneeId",
        to = "super::employee::Column::Id",
        on_delete = "SetNull"
    )]
    Assignee,
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
