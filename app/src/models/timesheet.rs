use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "timesheets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub hours_logged: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub hourly_rate: Decimal,
    pub date_logged: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    /// Always `hours_logged * hourly_rate`, recomputed on every save.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn total_amount(hours_logged: Decimal, hourly_rate: Decimal) -> Decimal {
    (hours_logged * hourly_rate).round_dp(2)
}
