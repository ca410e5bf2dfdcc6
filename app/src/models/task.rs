use sea_orm::entity::prelude::*;
use serde::Serialize;

use super::status::WorkStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub payment_ball_id: String,
    #[sea_orm(column_type = "Text")]
    pub task_brief: String,
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
        belongs_to = "super::payment_ball::Entity",
        from = "Column::PaymentBallId",
        to = "super::payment_ball::Column::Id",
        on_delete = "Cascade"
    )]
    PaymentBall,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::AssigneeId",
        to = "super::employee::Column::Id",
        on_delete = "SetNull"
    )]
    Assignee,
    #[sea_orm(has_many = "super::sub_contract::Entity")]
    SubContract,
}

impl Related<super::payment_ball::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentBall.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignee.def()
    }
}

impl Related<super::sub_contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubContract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
