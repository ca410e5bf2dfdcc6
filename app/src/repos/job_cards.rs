use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        client::{self, Entity as ClientEntity},
        job_card::{self, ActiveModel, Entity as JobCardEntity, Model as JobCard},
        payment_terms::{prepare_for_write, PaymentTermsInput, PaymentTermsMap},
        rfq::{Entity as RfqEntity, Model as Rfq},
        status::{ColorStatus, ProjectStatus},
    },
    repos::{RepoError, RepoResult},
    utils::{
        crypto::generate_id,
        serde_helpers::double_option,
        validation::{check_max_len, check_required, require, require_text, ValidationErrors},
    },
};

/// Required fields are optional here so that a missing one is reported as a
/// field error instead of a body parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateJobCard {
    pub rfq_id: Option<String>,
    pub job_number: Option<String>,
    pub scope_of_work: Option<String>,
    pub delivery_timelines: Option<NaiveDate>,
    #[serde(default)]
    pub payment_terms: Option<PaymentTermsInput>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub color_status: ColorStatus,
}

/// A create request that passed validation, with the terms encoded for storage.
#[derive(Debug, Clone)]
pub struct NewJobCard {
    pub rfq_id: String,
    pub job_number: String,
    pub scope_of_work: String,
    pub delivery_timelines: NaiveDate,
    pub payment_terms: Option<String>,
    pub status: ProjectStatus,
    pub color_status: ColorStatus,
}

impl CreateJobCard {
    pub fn validate(self) -> Result<NewJobCard, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let rfq_id = require_text(&mut errors, "rfq_id", self.rfq_id, None);
        let job_number = require_text(&mut errors, "job_number", self.job_number, Some(20));
        let scope_of_work = require_text(&mut errors, "scope_of_work", self.scope_of_work, None);
        let delivery_timelines =
            require(&mut errors, "delivery_timelines", self.delivery_timelines);

        let payment_terms = match self.payment_terms.as_ref().filter(|t| !t.is_empty()) {
            Some(terms) => prepare_for_write(Some(terms)).unwrap_or_else(|e| {
                errors.merge(e);
                None
            }),
            None => None,
        };

        match (rfq_id, job_number, scope_of_work, delivery_timelines) {
            (Some(rfq_id), Some(job_number), Some(scope_of_work), Some(delivery_timelines))
                if errors.is_empty() =>
            {
                Ok(NewJobCard {
                    rfq_id,
                    job_number,
                    scope_of_work,
                    delivery_timelines,
                    payment_terms,
                    status: self.status,
                    color_status: self.color_status,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJobCard {
    pub rfq_id: Option<String>,
    pub job_number: Option<String>,
    pub scope_of_work: Option<String>,
    pub delivery_timelines: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub payment_terms: Option<Option<PaymentTermsInput>>,
    pub status: Option<ProjectStatus>,
    pub color_status: Option<ColorStatus>,
}

impl UpdateJobCard {
    /// Field checks plus payment terms. `Some(None)` in the result clears
    /// the stored terms, `None` leaves them alone.
    pub fn validate(&self) -> Result<Option<Option<String>>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(job_number) = &self.job_number {
            check_required(&mut errors, "job_number", job_number);
            check_max_len(&mut errors, "job_number", job_number, 20);
        }
        if let Some(scope_of_work) = &self.scope_of_work {
            check_required(&mut errors, "scope_of_work", scope_of_work);
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
pub struct JobCardFilter {
    pub rfq: Option<String>,
    pub status: Option<ProjectStatus>,
    pub color_status: Option<ColorStatus>,
}

/// Wire shape of a job card: payment terms decoded into the keyed mapping
/// and the client's name resolved through the RFQ.
#[derive(Debug, Clone, Serialize)]
pub struct JobCardView {
    pub id: String,
    pub rfq_id: String,
    pub job_number: String,
    pub scope_of_work: String,
    pub delivery_timelines: NaiveDate,
    pub payment_terms: PaymentTermsMap,
    pub status: ProjectStatus,
    pub created_at: NaiveDateTime,
    pub color_status: ColorStatus,
    pub client_name: Option<String>,
}

impl JobCardView {
    pub fn new(job_card: JobCard, client_name: Option<String>) -> Self {
        let payment_terms = job_card.get_payment_terms();
        Self {
            id: job_card.id,
            rfq_id: job_card.rfq_id,
            job_number: job_card.job_number,
            scope_of_work: job_card.scope_of_work,
            delivery_timelines: job_card.delivery_timelines,
            payment_terms,
            status: job_card.status,
            created_at: job_card.created_at,
            color_status: job_card.color_status,
            client_name,
        }
    }
}

pub struct JobCardsRepo {
    db: DatabaseConnection,
}

impl JobCardsRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest first.
    pub async fn list(&self, filter: JobCardFilter) -> RepoResult<Vec<JobCardView>> {
        let mut query = JobCardEntity::find().find_also_related(RfqEntity);
        if let Some(rfq_id) = filter.rfq {
            query = query.filter(job_card::Column::RfqId.eq(rfq_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(job_card::Column::Status.eq(status));
        }
        if let Some(color_status) = filter.color_status {
            query = query.filter(job_card::Column::ColorStatus.eq(color_status));
        }

        let job_cards = query
            .order_by_desc(job_card::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let client_ids: Vec<String> = job_cards
            .iter()
            .filter_map(|(_, rfq)| rfq.as_ref().map(|r| r.client_id.clone()))
            .collect();
        let client_names: HashMap<String, String> = ClientEntity::find()
            .filter(client::Column::Id.is_in(client_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.client_name))
            .collect();

        Ok(job_cards
            .into_iter()
            .map(|(job_card, rfq)| {
                let client_name = rfq.and_then(|r| client_names.get(&r.client_id).cloned());
                JobCardView::new(job_card, client_name)
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> RepoResult<JobCardView> {
        let job_card = self.get_model(id).await?;
        let client_name = self.client_name_for_rfq(&job_card.rfq_id).await?;

        Ok(JobCardView::new(job_card, client_name))
    }

    pub async fn get_model(&self, id: &str) -> RepoResult<JobCard> {
        JobCardEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("Job card", id))
    }

    pub async fn create(&self, input: CreateJobCard) -> RepoResult<JobCardView> {
        let input = input.validate()?;

        let rfq = self.get_rfq(&input.rfq_id).await?;
        self.ensure_unique_job_number(&input.job_number, None)
            .await?;

        let job_card_model = ActiveModel {
            id: Set(generate_id()),
            rfq_id: Set(rfq.id.clone()),
            job_number: Set(input.job_number),
            scope_of_work: Set(input.scope_of_work),
            delivery_timelines: Set(input.delivery_timelines),
            payment_terms: Set(input.payment_terms),
            status: Set(input.status),
            created_at: Set(chrono::Utc::now().naive_utc()),
            color_status: Set(input.color_status),
        };
        let job_card = job_card_model.insert(&self.db).await?;
        let client_name = self.client_name_for_rfq(&rfq.id).await?;

        Ok(JobCardView::new(job_card, client_name))
    }

    /// Validation happens before anything is written, so a rejected update
    /// leaves the stored payment terms untouched.
    pub async fn update(&self, id: &str, input: UpdateJobCard) -> RepoResult<JobCardView> {
        let payment_terms = input.validate()?;

        let existing = self.get_model(id).await?;
        if let Some(rfq_id) = &input.rfq_id {
            self.get_rfq(rfq_id).await?;
        }
        if let Some(job_number) = &input.job_number {
            self.ensure_unique_job_number(job_number, Some(id)).await?;
        }

        let mut job_card: ActiveModel = existing.into();
        if let Some(rfq_id) = input.rfq_id {
            job_card.rfq_id = Set(rfq_id);
        }
        if let Some(job_number) = input.job_number {
            job_card.job_number = Set(job_number);
        }
        if let Some(scope_of_work) = input.scope_of_work {
            job_card.scope_of_work = Set(scope_of_work);
        }
        if let Some(delivery_timelines) = input.delivery_timelines {
            job_card.delivery_timelines = Set(delivery_timelines);
        }
        if let Some(payment_terms) = payment_terms {
            job_card.payment_terms = Set(payment_terms);
        }
        if let Some(status) = input.status {
            job_card.status = Set(status);
        }
        if let Some(color_status) = input.color_status {
            job_card.color_status = Set(color_status);
        }

        if job_card.is_changed() {
            job_card.update(&self.db).await?;
        }

        self.get(id).await
    }

    /// Cascades to payment balls, their tasks and the tasks' subcontracts.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = JobCardEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found("Job card", id));
        }

        Ok(())
    }

    async fn get_rfq(&self, rfq_id: &str) -> RepoResult<Rfq> {
        RfqEntity::find_by_id(rfq_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("RFQ", rfq_id))
    }

    async fn client_name_for_rfq(&self, rfq_id: &str) -> RepoResult<Option<String>> {
        let client = RfqEntity::find_by_id(rfq_id)
            .find_also_related(ClientEntity)
            .one(&self.db)
            .await?
            .and_then(|(_, client)| client);

        Ok(client.map(|c| c.client_name))
    }

    async fn ensure_unique_job_number(
        &self,
        job_number: &str,
        exclude_id: Option<&str>,
    ) -> RepoResult<()> {
        let mut query = JobCardEntity::find().filter(job_card::Column::JobNumber.eq(job_number));
        if let Some(id) = exclude_id {
            query = query.filter(job_card::Column::Id.ne(id));
        }

        if query.count(&self.db).await? > 0 {
            return Err(ValidationErrors::single(
                "job_number",
                "Job card with this job number already exists.",
            )
            .into());
        }

        Ok(())
    }
}
