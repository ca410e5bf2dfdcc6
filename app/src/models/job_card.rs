use sea_orm::entity::prelude::*;

use super::{
    payment_terms::{decode_keyed, PaymentTermsMap},
    status::{ColorStatus, ProjectStatus},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "job_cards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub rfq_id: String,
    #[sea_orm(unique)]
    pub job_number: String,
    #[sea_orm(column_type = "Text")]
    pub scope_of_work: String,
    pub delivery_timelines: Date,
    /// Serialized list of payment terms, see [`Model::get_payment_terms`].
    #[sea_orm(column_type = "Text", nullable)]
    pub payment_terms: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime,
    pub color_status: ColorStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rfq::Entity",
        from = "Column::RfqId",
        to = "super::rfq::Column::Id",
        on_delete = "Cascade"
    )]
    Rfq,
    #[sea_orm(has_many = "super::payment_ball::Entity")]
    PaymentBall,
}

impl Related<super::rfq::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rfq.def()
    }
}

impl Related<super::payment_ball::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentBall.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Payment terms keyed by ordinal. Unreadable stored text yields an empty map.
    pub fn get_payment_terms(&self) -> PaymentTermsMap {
        decode_keyed(self.payment_terms.as_deref())
    }
}
