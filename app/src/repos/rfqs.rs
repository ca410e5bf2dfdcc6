use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        client::{Entity as ClientEntity, Model as Client},
        rfq::{self, ActiveModel, Entity as RfqEntity, Model as Rfq},
        status::ProjectStatus,
    },
    repos::{RepoError, RepoResult},
    utils::{
        crypto::generate_id,
        serde_helpers::double_option,
        validation::{
            check_decimal, check_max_len, check_required, require, require_text,
            ValidationErrors, REQUIRED,
        },
    },
};

/// `client_id` may be omitted when the client comes from the route. The
/// other required fields are optional so that a missing one is a field error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRfq {
    pub client_id: Option<String>,
    pub project_type: Option<String>,
    pub scope_of_work: Option<String>,
    pub quotation_number: Option<String>,
    pub quotation_amount: Option<Decimal>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
}

#[derive(Debug, Clone)]
pub struct NewRfq {
    pub client_id: String,
    pub project_type: String,
    pub scope_of_work: String,
    pub quotation_number: String,
    pub quotation_amount: Decimal,
    pub remarks: Option<String>,
    pub status: ProjectStatus,
}

impl CreateRfq {
    pub fn validate(self) -> Result<NewRfq, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let client_id = match self.client_id.filter(|id| !id.trim().is_empty()) {
            Some(client_id) => Some(client_id),
            None => {
                errors.add("client_id", REQUIRED);
                None
            }
        };
        let project_type =
            require_text(&mut errors, "project_type", self.project_type, Some(255));
        let scope_of_work =
            require_text(&mut errors, "scope_of_work", self.scope_of_work, None);
        let quotation_number =
            require_text(&mut errors, "quotation_number", self.quotation_number, Some(20));
        let quotation_amount = require(&mut errors, "quotation_amount", self.quotation_amount);
        if let Some(quotation_amount) = quotation_amount {
            check_decimal(&mut errors, "quotation_amount", quotation_amount, 10, 2);
        }

        match (client_id, project_type, scope_of_work, quotation_number, quotation_amount) {
            (
                Some(client_id),
                Some(project_type),
                Some(scope_of_work),
                Some(quotation_number),
                Some(quotation_amount),
            ) if errors.is_empty() => Ok(NewRfq {
                client_id,
                project_type,
                scope_of_work,
                quotation_number,
                quotation_amount,
                remarks: self.remarks,
                status: self.status,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRfq {
    pub client_id: Option<String>,
    pub project_type: Option<String>,
    pub scope_of_work: Option<String>,
    pub quotation_number: Option<String>,
    pub quotation_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    pub remarks: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
}

impl UpdateRfq {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(project_type) = &self.project_type {
            check_required(&mut errors, "project_type", project_type);
            check_max_len(&mut errors, "project_type", project_type, 255);
        }
        if let Some(scope_of_work) = &self.scope_of_work {
            check_required(&mut errors, "scope_of_work", scope_of_work);
        }
        if let Some(quotation_number) = &self.quotation_number {
            check_required(&mut errors, "quotation_number", quotation_number);
            check_max_len(&mut errors, "quotation_number", quotation_number, 20);
        }
        if let Some(quotation_amount) = self.quotation_amount {
            check_decimal(&mut errors, "quotation_amount", quotation_amount, 10, 2);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RfqFilter {
    pub client: Option<String>,
    pub status: Option<ProjectStatus>,
    pub project_type: Option<String>,
}

/// An RFQ together with its client's name.
#[derive(Debug, Clone, Serialize)]
pub struct RfqView {
    #[serde(flatten)]
    pub rfq: Rfq,
    pub client_name: Option<String>,
}

impl From<(Rfq, Option<Client>)> for RfqView {
    fn from((rfq, client): (Rfq, Option<Client>)) -> Self {
        Self {
            rfq,
            client_name: client.map(|c| c.client_name),
        }
    }
}

pub struct RfqsRepo {
    db: DatabaseConnection,
}

impl RfqsRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Most recent RFQ first.
    pub async fn list(&self, filter: RfqFilter) -> RepoResult<Vec<RfqView>> {
        let mut query = RfqEntity::find().find_also_related(ClientEntity);
        if let Some(client_id) = filter.client {
            query = query.filter(rfq::Column::ClientId.eq(client_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(rfq::Column::Status.eq(status));
        }
        if let Some(project_type) = filter.project_type {
            query = query.filter(rfq::Column::ProjectType.eq(project_type));
        }

        let rfqs = query
            .order_by_desc(rfq::Column::RfqDate)
            .all(&self.db)
            .await?;

        Ok(rfqs.into_iter().map(RfqView::from).collect())
    }

    pub async fn get(&self, id: &str) -> RepoResult<RfqView> {
        RfqEntity::find_by_id(id)
            .find_also_related(ClientEntity)
            .one(&self.db)
            .await?
            .map(RfqView::from)
            .ok_or_else(|| RepoError::not_found("RFQ", id))
    }

    pub async fn create(&self, input: CreateRfq) -> RepoResult<RfqView> {
        let input = input.validate()?;

        let client = self.get_client(&input.client_id).await?;
        self.ensure_unique_quotation(&input.quotation_number, None)
            .await?;

        let rfq_model = ActiveModel {
            id: Set(generate_id()),
            client_id: Set(client.id.clone()),
            rfq_date: Set(chrono::Utc::now().naive_utc()),
            project_type: Set(input.project_type),
            scope_of_work: Set(input.scope_of_work),
            quotation_number: Set(input.quotation_number),
            quotation_amount: Set(input.quotation_amount),
            remarks: Set(input.remarks),
            status: Set(input.status),
        };
        let rfq = rfq_model.insert(&self.db).await?;

        Ok(RfqView::from((rfq, Some(client))))
    }

    pub async fn update(&self, id: &str, input: UpdateRfq) -> RepoResult<RfqView> {
        input.validate()?;

        let existing = RfqEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("RFQ", id))?;

        if let Some(client_id) = &input.client_id {
            self.get_client(client_id).await?;
        }
        if let Some(quotation_number) = &input.quotation_number {
            self.ensure_unique_quotation(quotation_number, Some(id))
                .await?;
        }

        let mut rfq: ActiveModel = existing.into();
        if let Some(client_id) = input.client_id {
            rfq.client_id = Set(client_id);
        }
        if let Some(project_type) = input.project_type {
            rfq.project_type = Set(project_type);
        }
        if let Some(scope_of_work) = input.scope_of_work {
            rfq.scope_of_work = Set(scope_of_work);
        }
        if let Some(quotation_number) = input.quotation_number {
            rfq.quotation_number = Set(quotation_number);
        }
        if let Some(quotation_amount) = input.quotation_amount {
            rfq.quotation_amount = Set(quotation_amount);
        }
        if let Some(remarks) = input.remarks {
            rfq.remarks = Set(remarks);
        }
        if let Some(status) = input.status {
            rfq.status = Set(status);
        }

        if rfq.is_changed() {
            rfq.update(&self.db).await?;
        }

        self.get(id).await
    }

    /// Cascades to job cards, payment balls, tasks and subcontracts.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = RfqEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found("RFQ", id));
        }

        Ok(())
    }

    async fn get_client(&self, client_id: &str) -> RepoResult<Client> {
        ClientEntity::find_by_id(client_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("Client", client_id))
    }

    async fn ensure_unique_quotation(
        &self,
        quotation_number: &str,
        exclude_id: Option<&str>,
    ) -> RepoResult<()> {
        let mut query =
            RfqEntity::find().filter(rfq::Column::QuotationNumber.eq(quotation_number));
        if let Some(id) = exclude_id {
            query = query.filter(rfq::Column::Id.ne(id));
        }

        if query.count(&self.db).await? > 0 {
            return Err(ValidationErrors::single(
                "quotation_number",
                "RFQ with this quotation number already exists.",
            )
            .into());
        }

        Ok(())
    }
}
