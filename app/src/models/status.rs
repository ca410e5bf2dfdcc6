use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of an RFQ or a job card.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ProjectStatus {
    #[default]
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Ongoing")]
    Ongoing,
    #[sea_orm(string_value = "Completed")]
    Completed,
}

/// Progress of a payment ball, task or subcontract.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum WorkStatus {
    #[default]
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "InProgress")]
    InProgress,
    #[sea_orm(string_value = "Completed")]
    Completed,
}

/// Workflow tag shared by job cards and payment balls. Purple drives invoicing.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ColorStatus {
    #[default]
    #[sea_orm(string_value = "gray")]
    Gray,
    #[sea_orm(string_value = "blue")]
    Blue,
    #[sea_orm(string_value = "purple")]
    Purple,
    #[sea_orm(string_value = "pink")]
    Pink,
    #[sea_orm(string_value = "green")]
    Green,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_stored_values() {
        assert_eq!(
            serde_json::to_value(ColorStatus::Purple).unwrap(),
            serde_json::json!("purple")
        );
        assert_eq!(ColorStatus::Purple.to_value(), "purple".to_string());
        assert_eq!(
            serde_json::from_str::<WorkStatus>(r#""InProgress""#).unwrap(),
            WorkStatus::InProgress
        );
        assert!(serde_json::from_str::<ProjectStatus>(r#""InProgress""#).is_err());
    }
}
