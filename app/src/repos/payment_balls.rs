use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    models::{
        job_card::Entity as JobCardEntity,
        payment_ball::{self, ActiveModel, Entity as PaymentBallEntity, Model as PaymentBall},
        payment_terms::{prepare_for_write, PaymentTerm, PaymentTermsInput},
        status::{ColorStatus, WorkStatus},
    },
    repos::{RepoError, RepoResult},
    utils::{
        crypto::{generate_id, generate_invoice_number},
        serde_helpers::double_option,
        validation::{check_decimal, check_percentage, ValidationErrors, REQUIRED},
    },
};

/// Required fields are optional here so that a missing one is reported as a
/// field error instead of a body parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentBall {
    pub job_card_id: Option<String>,
    pub project_percentage: Option<Decimal>,
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub project_status: WorkStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub color_status: ColorStatus,
    #[serde(default)]
    pub payment_terms: Option<PaymentTermsInput>,
}

/// A create request that passed validation.
#[derive(Debug, Clone)]
pub struct NewPaymentBall {
    pub job_card_id: String,
    pub project_percentage: Decimal,
    pub amount: Decimal,
    pub project_status: WorkStatus,
    pub notes: Option<String>,
    pub color_status: ColorStatus,
    pub payment_terms: Option<String>,
}

impl CreatePaymentBall {
    pub fn validate(self) -> Result<NewPaymentBall, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.job_card_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            errors.add("job_card_id", REQUIRED);
        }
        match self.project_percentage {
            Some(value) => {
                check_percentage(&mut errors, "project_percentage", value);
                check_decimal(&mut errors, "project_percentage", value, 5, 2);
            }
            None => errors.add("project_percentage", REQUIRED),
        }
        match self.amount {
            Some(value) => check_decimal(&mut errors, "amount", value, 10, 2),
            None => errors.add("amount", REQUIRED),
        }

        let payment_terms = match self.payment_terms.as_ref().filter(|t| !t.is_empty()) {
            Some(terms) => prepare_for_write(Some(terms)).unwrap_or_else(|e| {
                errors.merge(e);
                None
            }),
            None => None,
        };

        match (self.job_card_id, self.project_percentage, self.amount) {
            (Some(job_card_id), Some(project_percentage), Some(amount)) if errors.is_empty() => {
                Ok(NewPaymentBall {
                    job_card_id,
                    project_percentage,
                    amount,
                    project_status: self.project_status,
                    notes: self.notes,
                    color_status: self.color_status,
                    payment_terms,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePaymentBall {
    pub job_card_id: Option<String>,
    pub project_percentage: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub project_status: Option<WorkStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    pub color_status: Option<ColorStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub payment_terms: Option<Option<PaymentTermsInput>>,
}

impl UpdatePaymentBall {
    /// Returns the payment terms to persist: `Some(None)` clears them.
    pub fn validate(&self) -> Result<Option<Option<String>>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(value) = self.project_percentage {
            check_percentage(&mut errors, "project_percentage", value);
            check_decimal(&mut errors, "project_percentage", value, 5, 2);
        }
        if let Some(value) = self.amount {
            check_decimal(&mut errors, "amount", value, 10, 2);
        }

        let payment_terms = match &self.payment_terms {
            Some(terms) => match prepare_for_write(terms.as_ref()) {
                Ok(encoded) => Some(encoded),
                Err(e) => {
                    errors.merge(e);
                    None
                }
            },
            None => None,
        };

        errors.into_result().map(|_| payment_terms)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentBallFilter {
    pub job_card: Option<String>,
}

/// Wire shape of a payment ball with its terms decoded into a list.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentBallView {
    pub id: String,
    pub job_card_id: String,
    pub project_percentage: Decimal,
    pub project_status: WorkStatus,
    pub notes: Option<String>,
    pub color_status: ColorStatus,
    pub invoice_number: Option<String>,
    pub amount: Decimal,
    pub payment_terms: Vec<PaymentTerm>,
    pub created_at: NaiveDateTime,
}

impl From<PaymentBall> for PaymentBallView {
    fn from(payment_ball: PaymentBall) -> Self {
        let payment_terms = payment_ball.get_payment_terms();
        Self {
            id: payment_ball.id,
            job_card_id: payment_ball.job_card_id,
            project_percentage: payment_ball.project_percentage,
            project_status: payment_ball.project_status,
            notes: payment_ball.notes,
            color_status: payment_ball.color_status,
            invoice_number: payment_ball.invoice_number,
            amount: payment_ball.amount,
            payment_terms,
            created_at: payment_ball.created_at,
        }
    }
}

pub struct PaymentBallsRepo {
    db: DatabaseConnection,
}

impl PaymentBallsRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// In creation order.
    pub async fn list(&self, filter: PaymentBallFilter) -> RepoResult<Vec<PaymentBall>> {
        let mut query = PaymentBallEntity::find();
        if let Some(job_card_id) = filter.job_card {
            query = query.filter(payment_ball::Column::JobCardId.eq(job_card_id));
        }

        let payment_balls = query
            .order_by_asc(payment_ball::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(payment_balls)
    }

    pub async fn get(&self, id: &str) -> RepoResult<PaymentBall> {
        PaymentBallEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("Payment ball", id))
    }

    pub async fn create(&self, input: CreatePaymentBall) -> RepoResult<PaymentBall> {
        let input = input.validate()?;
        self.ensure_job_card(&input.job_card_id).await?;

        let payment_ball_model = ActiveModel {
            id: Set(generate_id()),
            job_card_id: Set(input.job_card_id),
            project_percentage: Set(input.project_percentage),
            project_status: Set(input.project_status),
            notes: Set(input.notes),
            color_status: Set(input.color_status),
            invoice_number: Set(None),
            amount: Set(input.amount),
            payment_terms: Set(input.payment_terms),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        let payment_ball = payment_ball_model.insert(&self.db).await?;

        if payment_ball.awaits_invoice() {
            return self.generate_invoice(&payment_ball.id).await;
        }

        Ok(payment_ball)
    }

    pub async fn update(&self, id: &str, input: UpdatePaymentBall) -> RepoResult<PaymentBall> {
        let payment_terms = input.validate()?;

        let existing = self.get(id).await?;
        if let Some(job_card_id) = &input.job_card_id {
            self.ensure_job_card(job_card_id).await?;
        }

        let mut payment_ball: ActiveModel = existing.clone().into();
        if let Some(job_card_id) = input.job_card_id {
            payment_ball.job_card_id = Set(job_card_id);
        }
        if let Some(project_percentage) = input.project_percentage {
            payment_ball.project_percentage = Set(project_percentage);
        }
        if let Some(amount) = input.amount {
            payment_ball.amount = Set(amount);
        }
        if let Some(project_status) = input.project_status {
            payment_ball.project_status = Set(project_status);
        }
        if let Some(notes) = input.notes {
            payment_ball.notes = Set(notes);
        }
        if let Some(color_status) = input.color_status {
            payment_ball.color_status = Set(color_status);
        }
        if let Some(payment_terms) = payment_terms {
            payment_ball.payment_terms = Set(payment_terms);
        }

        let payment_ball = if payment_ball.is_changed() {
            payment_ball.update(&self.db).await?
        } else {
            existing
        };

        if payment_ball.awaits_invoice() {
            return self.generate_invoice(id).await;
        }

        Ok(payment_ball)
    }

    /// Assigns an invoice number the first time the payment ball is seen
    /// purple without one. The write is a single conditional UPDATE, so of
    /// two concurrent callers only one can fill the column; once set, the
    /// number never changes.
    pub async fn generate_invoice(&self, id: &str) -> RepoResult<PaymentBall> {
        let payment_ball = self.get(id).await?;
        if !payment_ball.awaits_invoice() {
            return Ok(payment_ball);
        }

        let invoice_number = generate_invoice_number();
        let result = PaymentBallEntity::update_many()
            .col_expr(
                payment_ball::Column::InvoiceNumber,
                Expr::value(invoice_number.clone()),
            )
            .filter(payment_ball::Column::Id.eq(id))
            .filter(payment_ball::Column::ColorStatus.eq(ColorStatus::Purple))
            .filter(payment_ball::Column::InvoiceNumber.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 1 {
            info!("Generated invoice {} for payment ball {}", invoice_number, id);
        } else {
            debug!("Invoice for payment ball {} was assigned concurrently", id);
        }

        self.get(id).await
    }

    /// Cascades to tasks and their subcontracts.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = PaymentBallEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found("Payment ball", id));
        }

        Ok(())
    }

    async fn ensure_job_card(&self, job_card_id: &str) -> RepoResult<()> {
        JobCardEntity::find_by_id(job_card_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Job card", job_card_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_required_fields_are_named() {
        let errors = CreatePaymentBall::default().validate().unwrap_err();
        assert!(errors.has_error("job_card_id"));
        assert!(errors.has_error("project_percentage"));
        assert!(errors.has_error("amount"));
    }

    #[test]
    fn project_percentage_must_be_a_percentage() {
        let input = CreatePaymentBall {
            job_card_id: Some("jc".to_string()),
            project_percentage: Some(dec!(101)),
            amount: Some(dec!(1000)),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert!(errors.has_error("project_percentage"));
    }

    #[test]
    fn list_terms_must_total_one_hundred() {
        let input: CreatePaymentBall = serde_json::from_value(serde_json::json!({
            "job_card_id": "jc",
            "project_percentage": 30,
            "amount": "1500.00",
            "payment_terms": [
                {"milestone": "Advance", "percentage": 20},
                {"milestone": "Delivery", "percentage": 50}
            ]
        }))
        .unwrap();
        assert!(input.validate().unwrap_err().has_error("payment_terms"));
    }

    #[test]
    fn valid_request_carries_encoded_terms() {
        let input: CreatePaymentBall = serde_json::from_value(serde_json::json!({
            "job_card_id": "jc",
            "project_percentage": 30,
            "amount": 1500,
            "color_status": "blue",
            "payment_terms": [{"milestone": "Advance", "percentage": 100}]
        }))
        .unwrap();
        let new = input.validate().unwrap();
        assert_eq!(new.color_status, ColorStatus::Blue);
        assert!(new.payment_terms.unwrap().contains("Advance"));
    }

    #[test]
    fn update_with_null_terms_clears_them() {
        let input: UpdatePaymentBall =
            serde_json::from_value(serde_json::json!({"payment_terms": null})).unwrap();
        assert_eq!(input.validate().unwrap(), Some(None));

        let untouched = UpdatePaymentBall::default();
        assert_eq!(untouched.validate().unwrap(), None);
    }
}
