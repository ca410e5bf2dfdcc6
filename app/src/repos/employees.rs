use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use serde::Deserialize;

use crate::{
    models::employee::{self, ActiveModel, Entity as EmployeeEntity, Model as Employee},
    repos::{RepoError, RepoResult},
    utils::{
        crypto::generate_id,
        serde_helpers::double_option,
        validation::{check_max_len, check_required, require_text, ValidationErrors},
    },
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEmployee {
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: Option<String>,
}

impl CreateEmployee {
    pub fn validate(self) -> Result<NewEmployee, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = require_text(&mut errors, "name", self.name, Some(255));
        if let Some(email) = &self.email {
            check_max_len(&mut errors, "email", email, 255);
        }

        match name {
            Some(name) if errors.is_empty() => Ok(NewEmployee {
                name,
                email: self.email,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
}

impl UpdateEmployee {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            check_required(&mut errors, "name", name);
            check_max_len(&mut errors, "name", name, 255);
        }
        if let Some(Some(email)) = &self.email {
            check_max_len(&mut errors, "email", email, 255);
        }
        errors.into_result()
    }
}

pub struct EmployeesRepo {
    db: DatabaseConnection,
}

impl EmployeesRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> RepoResult<Vec<Employee>> {
        let employees = EmployeeEntity::find()
            .order_by_asc(employee::Column::Name)
            .all(&self.db)
            .await?;

        Ok(employees)
    }

    pub async fn get(&self, id: &str) -> RepoResult<Employee> {
        EmployeeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("Employee", id))
    }

    pub async fn get_by_name(&self, name: &str) -> RepoResult<Option<Employee>> {
        let employee = EmployeeEntity::find()
            .filter(employee::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(employee)
    }

    /// Resolves employee names for a batch of assignee ids.
    pub async fn names_by_id(&self, ids: Vec<String>) -> RepoResult<HashMap<String, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let names = EmployeeEntity::find()
            .filter(employee::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect();

        Ok(names)
    }

    /// An unknown assignee is a field error, not a missing resource.
    pub async fn ensure_assignee(&self, assignee_id: &str) -> RepoResult<()> {
        let exists = EmployeeEntity::find_by_id(assignee_id)
            .one(&self.db)
            .await?
            .is_some();
        if !exists {
            return Err(ValidationErrors::single(
                "assignee_id",
                format!("Invalid pk \"{}\" - object does not exist.", assignee_id),
            )
            .into());
        }

        Ok(())
    }

    pub async fn create(&self, input: CreateEmployee) -> RepoResult<Employee> {
        let input = input.validate()?;

        let employee_model = ActiveModel {
            id: Set(generate_id()),
            name: Set(input.name),
            email: Set(input.email),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        let employee = employee_model.insert(&self.db).await?;

        Ok(employee)
    }

    pub async fn update(&self, id: &str, input: UpdateEmployee) -> RepoResult<Employee> {
        input.validate()?;

        let existing = self.get(id).await?;
        let mut employee: ActiveModel = existing.clone().into();
        if let Some(name) = input.name {
            employee.name = Set(name);
        }
        if let Some(email) = input.email {
            employee.email = Set(email);
        }

        if !employee.is_changed() {
            return Ok(existing);
        }

        Ok(employee.update(&self.db).await?)
    }

    /// Tasks and subcontracts assigned to this employee keep existing with
    /// their assignee cleared (`ON DELETE SET NULL`).
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = EmployeeEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found("Employee", id));
        }

        Ok(())
    }
}
