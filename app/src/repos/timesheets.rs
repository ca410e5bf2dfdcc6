use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};
use serde::Deserialize;

use crate::{
    models::timesheet::{
        self, total_amount, ActiveModel, Entity as TimesheetEntity, Model as Timesheet,
    },
    repos::{RepoError, RepoResult},
    utils::{
        crypto::generate_id,
        serde_helpers::double_option,
        validation::{check_decimal, require, ValidationErrors},
    },
};

fn check_amounts(errors: &mut ValidationErrors, hours_logged: Decimal, hourly_rate: Decimal) {
    if hours_logged < Decimal::ZERO {
        errors.add("hours_logged", "Ensure this value is greater than or equal to 0.");
    }
    if hourly_rate < Decimal::ZERO {
        errors.add("hourly_rate", "Ensure this value is greater than or equal to 0.");
    }
    check_decimal(errors, "hours_logged", hours_logged, 5, 2);
    check_decimal(errors, "hourly_rate", hourly_rate, 10, 2);
    if errors.is_empty() {
        check_decimal(errors, "total_amount", total_amount(hours_logged, hourly_rate), 10, 2);
    }
}

/// `total_amount` is derived, so it is not accepted from callers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTimesheet {
    pub hours_logged: Option<Decimal>,
    pub hourly_rate: Option<Decimal>,
    #[serde(default)]
    pub date_logged: Option<NaiveDate>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl CreateTimesheet {
    /// Returns the validated hours and rate.
    pub fn validate(&self) -> Result<(Decimal, Decimal), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let hours_logged = require(&mut errors, "hours_logged", self.hours_logged);
        let hourly_rate = require(&mut errors, "hourly_rate", self.hourly_rate);
        match (hours_logged, hourly_rate) {
            (Some(hours_logged), Some(hourly_rate)) => {
                check_amounts(&mut errors, hours_logged, hourly_rate);
                errors.into_result().map(|_| (hours_logged, hourly_rate))
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTimesheet {
    pub hours_logged: Option<Decimal>,
    pub hourly_rate: Option<Decimal>,
    pub date_logged: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub remarks: Option<Option<String>>,
}

pub struct TimesheetsRepo {
    db: DatabaseConnection,
}

impl TimesheetsRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> RepoResult<Vec<Timesheet>> {
        let timesheets = TimesheetEntity::find()
            .order_by_desc(timesheet::Column::DateLogged)
            .all(&self.db)
            .await?;

        Ok(timesheets)
    }

    pub async fn get(&self, id: &str) -> RepoResult<Timesheet> {
        TimesheetEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("Timesheet", id))
    }

    pub async fn create(&self, input: CreateTimesheet) -> RepoResult<Timesheet> {
        let (hours_logged, hourly_rate) = input.validate()?;

        let timesheet_model = ActiveModel {
            id: Set(generate_id()),
            hours_logged: Set(hours_logged),
            hourly_rate: Set(hourly_rate),
            date_logged: Set(input
                .date_logged
                .unwrap_or_else(|| chrono::Utc::now().date_naive())),
            remarks: Set(input.remarks),
            total_amount: Set(total_amount(hours_logged, hourly_rate)),
        };
        let timesheet = timesheet_model.insert(&self.db).await?;

        Ok(timesheet)
    }

    /// The total is recomputed from the merged hours and rate on every save.
    pub async fn update(&self, id: &str, input: UpdateTimesheet) -> RepoResult<Timesheet> {
        let existing = self.get(id).await?;

        let hours_logged = input.hours_logged.unwrap_or(existing.hours_logged);
        let hourly_rate = input.hourly_rate.unwrap_or(existing.hourly_rate);
        let mut errors = ValidationErrors::new();
        check_amounts(&mut errors, hours_logged, hourly_rate);
        errors.into_result()?;

        let mut timesheet: ActiveModel = existing.into();
        timesheet.hours_logged = Set(hours_logged);
        timesheet.hourly_rate = Set(hourly_rate);
        if let Some(date_logged) = input.date_logged {
            timesheet.date_logged = Set(date_logged);
        }
        if let Some(remarks) = input.remarks {
            timesheet.remarks = Set(remarks);
        }
        timesheet.total_amount = Set(total_amount(hours_logged, hourly_rate));

        if timesheet.is_changed() {
            return Ok(timesheet.update(&self.db).await?);
        }

        self.get(id).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = TimesheetEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found("Timesheet", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_hours_are_rejected() {
        let mut errors = ValidationErrors::new();
        check_amounts(&mut errors, dec!(-1), dec!(20));
        assert!(errors.has_error("hours_logged"));
    }

    #[test]
    fn overflowing_total_is_reported() {
        let mut errors = ValidationErrors::new();
        check_amounts(&mut errors, dec!(999.99), dec!(99999999.99));
        assert!(errors.has_error("total_amount"));
    }

    #[test]
    fn total_amount_in_request_is_ignored() {
        let input: CreateTimesheet = serde_json::from_value(serde_json::json!({
            "hours_logged": "8",
            "hourly_rate": "50",
            "total_amount": "1"
        }))
        .unwrap();
        let (hours_logged, hourly_rate) = input.validate().unwrap();
        assert_eq!(total_amount(hours_logged, hourly_rate), dec!(400));
        assert!(input.date_logged.is_none());
    }

    #[test]
    fn missing_rate_is_a_field_error() {
        let input: CreateTimesheet =
            serde_json::from_value(serde_json::json!({"hours_logged": "2.5"})).unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.has_error("hourly_rate"));
        assert!(!errors.has_error("hours_logged"));
    }
}
