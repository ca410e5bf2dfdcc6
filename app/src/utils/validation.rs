use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Field-level validation errors: field name -> messages.
#[derive(Debug, Default, Clone, PartialEq, Error, Serialize)]
#[serde(transparent)]
#[error("validation failed: {errors:?}")]
pub struct ValidationErrors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
    }

    /// Ok when nothing was collected, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub const REQUIRED: &str = "This field is required.";

pub fn check_required(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field may not be blank.");
    }
}

/// Records `REQUIRED` when the field was absent and passes the value through.
pub fn require<T>(errors: &mut ValidationErrors, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.add(field, REQUIRED);
    }
    value
}

/// Like [`require`], and a present value must also be non-blank and fit `max` chars.
pub fn require_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
    max: Option<usize>,
) -> Option<String> {
    let value = require(errors, field, value)?;
    check_required(errors, field, &value);
    if let Some(max) = max {
        check_max_len(errors, field, &value, max);
    }
    Some(value)
}

pub fn check_max_len(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(
            field,
            format!("Ensure this field has no more than {} characters.", max),
        );
    }
}

/// Percentages, weightages and completion ratios all live in [0, 100].
pub fn check_percentage(errors: &mut ValidationErrors, field: &str, value: Decimal) {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        errors.add(field, "Must be between 0 and 100");
    }
}

/// Mirrors a NUMERIC(max_digits, decimal_places) column.
pub fn check_decimal(
    errors: &mut ValidationErrors,
    field: &str,
    value: Decimal,
    max_digits: u32,
    decimal_places: u32,
) {
    let normalized = value.normalize();
    if normalized.scale() > decimal_places {
        errors.add(
            field,
            format!(
                "Ensure that there are no more than {} decimal places.",
                decimal_places
            ),
        );
        return;
    }

    let limit = Decimal::from(10u64.pow(max_digits - decimal_places));
    if normalized.abs() >= limit {
        errors.add(
            field,
            format!(
                "Ensure that there are no more than {} digits in total.",
                max_digits
            ),
        );
    }
}
