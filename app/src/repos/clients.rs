use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder,
};
use serde::Deserialize;

use crate::{
    config::catalog::Catalog,
    models::client::{self, ActiveModel, Entity as ClientEntity, Model as Client},
    repos::{RepoError, RepoResult},
    utils::{
        crypto::generate_id,
        serde_helpers::double_option,
        validation::{check_max_len, check_required, require_text, ValidationErrors},
    },
};

fn default_active() -> bool {
    true
}

fn check_service(errors: &mut ValidationErrors, catalog: &Catalog, service: &str) {
    check_max_len(errors, "service", service, 100);
    if !catalog.allows_service(service) {
        errors.add("service", format!("\"{}\" is not a valid choice.", service));
    }
}

/// Required fields are optional here so that a missing one is reported as a
/// field error instead of a body parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub client_name: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    pub company_name: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default = "default_active")]
    pub status: bool,
}

#[derive(Debug, Clone)]
pub struct NewClient {
    pub client_name: String,
    pub contact_info: Option<String>,
    pub company_name: String,
    pub service: Option<String>,
    pub about: Option<String>,
    pub status: bool,
}

impl CreateClient {
    pub fn validate(self, catalog: &Catalog) -> Result<NewClient, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let client_name = require_text(&mut errors, "client_name", self.client_name, Some(255));
        let company_name =
            require_text(&mut errors, "company_name", self.company_name, Some(255));
        if let Some(contact_info) = &self.contact_info {
            check_max_len(&mut errors, "contact_info", contact_info, 255);
        }
        if let Some(service) = &self.service {
            check_service(&mut errors, catalog, service);
        }

        match (client_name, company_name) {
            (Some(client_name), Some(company_name)) if errors.is_empty() => Ok(NewClient {
                client_name,
                contact_info: self.contact_info,
                company_name,
                service: self.service,
                about: self.about,
                status: self.status,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClient {
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact_info: Option<Option<String>>,
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub service: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub about: Option<Option<String>>,
    pub status: Option<bool>,
}

impl UpdateClient {
    pub fn validate(&self, catalog: &Catalog) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(client_name) = &self.client_name {
            check_required(&mut errors, "client_name", client_name);
            check_max_len(&mut errors, "client_name", client_name, 255);
        }
        if let Some(company_name) = &self.company_name {
            check_required(&mut errors, "company_name", company_name);
            check_max_len(&mut errors, "company_name", company_name, 255);
        }
        if let Some(Some(contact_info)) = &self.contact_info {
            check_max_len(&mut errors, "contact_info", contact_info, 255);
        }
        if let Some(Some(service)) = &self.service {
            check_service(&mut errors, catalog, service);
        }
        errors.into_result()
    }
}

pub struct ClientsRepo {
    db: DatabaseConnection,
}

impl ClientsRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest first.
    pub async fn list(&self) -> RepoResult<Vec<Client>> {
        let clients = ClientEntity::find()
            .order_by_desc(client::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(clients)
    }

    pub async fn get(&self, id: &str) -> RepoResult<Client> {
        ClientEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("Client", id))
    }

    pub async fn create(&self, input: CreateClient, catalog: &Catalog) -> RepoResult<Client> {
        let input = input.validate(catalog)?;

        let client_model = ActiveModel {
            id: Set(generate_id()),
            client_name: Set(input.client_name),
            contact_info: Set(input.contact_info),
            company_name: Set(input.company_name),
            service: Set(input.service),
            about: Set(input.about),
            status: Set(input.status),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        let client = client_model.insert(&self.db).await?;

        Ok(client)
    }

    pub async fn update(
        &self,
        id: &str,
        input: UpdateClient,
        catalog: &Catalog,
    ) -> RepoResult<Client> {
        input.validate(catalog)?;

        let existing = self.get(id).await?;
        let mut client: ActiveModel = existing.clone().into();
        if let Some(client_name) = input.client_name {
            client.client_name = Set(client_name);
        }
        if let Some(contact_info) = input.contact_info {
            client.contact_info = Set(contact_info);
        }
        if let Some(company_name) = input.company_name {
            client.company_name = Set(company_name);
        }
        if let Some(service) = input.service {
            client.service = Set(service);
        }
        if let Some(about) = input.about {
            client.about = Set(about);
        }
        if let Some(status) = input.status {
            client.status = Set(status);
        }

        if !client.is_changed() {
            return Ok(existing);
        }

        Ok(client.update(&self.db).await?)
    }

    /// Cascades to the client's RFQs and everything below them.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = ClientEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found("Client", id));
        }

        Ok(())
    }
}
