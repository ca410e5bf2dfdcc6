use sea_orm::entity::prelude::*;
use serde::Serialize;

use super::status::ProjectStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "rfqs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub client_id: String,
    pub rfq_date: DateTime,
    pub project_type: String,
    #[sea_orm(column_type = "Text")]
    pub scope_of_work: String,
    #[sea_orm(unique)]
    pub quotation_number: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub quotation_amount: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub status: ProjectStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_delete = "Cascade"
    )]
    Client,
    #[sea_orm(has_many = "super::job_card::Entity")]
    JobCard,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::job_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobCard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
