use sea_orm::entity::prelude::*;

use super::{
    payment_terms::{decode_list, PaymentTerm},
    status::{ColorStatus, WorkStatus},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_balls")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub job_card_id: String,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub project_percentage: Decimal,
    pub project_status: WorkStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub color_status: ColorStatus,
    pub invoice_number: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub payment_terms: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job_card::Entity",
        from = "Column::JobCardId",
        to = "super::job_card::Column::Id",
        on_delete = "Cascade"
    )]
    JobCard,
    #[sea_orm(has_many = "super::task::Entity")]
    Task,
}

impl Related<super::job_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobCard.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn get_payment_terms(&self) -> Vec<PaymentTerm> {
        decode_list(self.payment_terms.as_deref())
    }

    /// Purple without an invoice yet.
    pub fn awaits_invoice(&self) -> bool {
        self.color_status == ColorStatus::Purple && self.invoice_number.is_none()
    }
}
