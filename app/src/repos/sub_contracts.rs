use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        status::WorkStatus,
        sub_contract::{self, ActiveModel, Entity as SubContractEntity, Model as SubContract},
        task::{Entity as TaskEntity, Model as Task},
    },
    repos::{employees::EmployeesRepo, tasks::check_progress, RepoError, RepoResult},
    utils::{
        crypto::generate_id,
        serde_helpers::double_option,
        validation::{check_required, require, require_text, ValidationErrors, REQUIRED},
    },
};

/// `task_id` may be omitted when the parent task comes from the route. The
/// other required fields are optional so that a missing one is a field error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSubContract {
    pub task_id: Option<String>,
    pub subcontract_brief: Option<String>,
    pub weightage: Option<Decimal>,
    #[serde(default)]
    pub status: WorkStatus,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub completion_percentage: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewSubContract {
    pub task_id: String,
    pub subcontract_brief: String,
    pub weightage: Decimal,
    pub status: WorkStatus,
    pub due_date: NaiveDate,
    pub assignee_id: Option<String>,
    pub remarks: Option<String>,
    pub completion_percentage: Decimal,
}

impl CreateSubContract {
    pub fn validate(self) -> Result<NewSubContract, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let task_id = match self.task_id.filter(|id| !id.trim().is_empty()) {
            Some(task_id) => Some(task_id),
            None => {
                errors.add("task_id", REQUIRED);
                None
            }
        };
        let subcontract_brief =
            require_text(&mut errors, "subcontract_brief", self.subcontract_brief, None);
        let weightage = require(&mut errors, "weightage", self.weightage);
        let due_date = require(&mut errors, "due_date", self.due_date);
        check_progress(&mut errors, weightage, Some(self.completion_percentage));

        match (task_id, subcontract_brief, weightage, due_date) {
            (Some(task_id), Some(subcontract_brief), Some(weightage), Some(due_date))
                if errors.is_empty() =>
            {
                Ok(NewSubContract {
                    task_id,
                    subcontract_brief,
                    weightage,
                    status: self.status,
                    due_date,
                    assignee_id: self.assignee_id,
                    remarks: self.remarks,
                    completion_percentage: self.completion_percentage,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubContract {
    pub task_id: Option<String>,
    pub subcontract_brief: Option<String>,
    pub weightage: Option<Decimal>,
    pub status: Option<WorkStatus>,
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub remarks: Option<Option<String>>,
    pub completion_percentage: Option<Decimal>,
}

impl UpdateSubContract {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(subcontract_brief) = &self.subcontract_brief {
            check_required(&mut errors, "subcontract_brief", subcontract_brief);
        }
        check_progress(&mut errors, self.weightage, self.completion_percentage);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubContractFilter {
    pub task: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskDetails {
    pub task_brief: String,
    pub task_status: WorkStatus,
}

impl From<Task> for TaskDetails {
    fn from(task: Task) -> Self {
        Self {
            task_brief: task.task_brief,
            task_status: task.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubContractView {
    #[serde(flatten)]
    pub sub_contract: SubContract,
    pub assignee_name: Option<String>,
    pub task_details: Option<TaskDetails>,
}

pub struct SubContractsRepo {
    db: DatabaseConnection,
}

impl SubContractsRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn employees(&self) -> EmployeesRepo {
        EmployeesRepo::new(self.db.clone())
    }

    /// Newest first.
    pub async fn list(&self, filter: SubContractFilter) -> RepoResult<Vec<SubContractView>> {
        let mut query = SubContractEntity::find().find_also_related(TaskEntity);
        if let Some(task_id) = filter.task {
            query = query.filter(sub_contract::Column::TaskId.eq(task_id));
        }

        let sub_contracts = query
            .order_by_desc(sub_contract::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let assignee_ids = sub_contracts
            .iter()
            .filter_map(|(sub_contract, _)| sub_contract.assignee_id.clone())
            .collect();
        let names = self.employees().names_by_id(assignee_ids).await?;

        Ok(sub_contracts
            .into_iter()
            .map(|(sub_contract, task)| {
                let assignee_name = sub_contract
                    .assignee_id
                    .as_ref()
                    .and_then(|id| names.get(id).cloned());
                SubContractView {
                    sub_contract,
                    assignee_name,
                    task_details: task.map(TaskDetails::from),
                }
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> RepoResult<SubContractView> {
        let (sub_contract, task) = SubContractEntity::find_by_id(id)
            .find_also_related(TaskEntity)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("Subcontract", id))?;

        let assignee_name = match &sub_contract.assignee_id {
            Some(assignee_id) => self
                .employees()
                .names_by_id(vec![assignee_id.clone()])
                .await?
                .remove(assignee_id),
            None => None,
        };

        Ok(SubContractView {
            sub_contract,
            assignee_name,
            task_details: task.map(TaskDetails::from),
        })
    }

    pub async fn create(&self, input: CreateSubContract) -> RepoResult<SubContractView> {
        let input = input.validate()?;

        self.ensure_task(&input.task_id).await?;
        if let Some(assignee_id) = &input.assignee_id {
            self.employees().ensure_assignee(assignee_id).await?;
        }

        let now = chrono::Utc::now().naive_utc();
        let sub_contract_model = ActiveModel {
            id: Set(generate_id()),
            task_id: Set(input.task_id),
            subcontract_brief: Set(input.subcontract_brief),
            weightage: Set(input.weightage),
            status: Set(input.status),
            due_date: Set(input.due_date),
            assignee_id: Set(input.assignee_id),
            remarks: Set(input.remarks),
            completion_percentage: Set(input.completion_percentage),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let sub_contract = sub_contract_model.insert(&self.db).await?;

        self.get(&sub_contract.id).await
    }

    pub async fn update(&self, id: &str, input: UpdateSubContract) -> RepoResult<SubContractView> {
        input.validate()?;

        let existing = SubContractEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("Subcontract", id))?;
        if let Some(task_id) = &input.task_id {
            self.ensure_task(task_id).await?;
        }
        if let Some(Some(assignee_id)) = &input.assignee_id {
            self.employees().ensure_assignee(assignee_id).await?;
        }

        let mut sub_contract: ActiveModel = existing.into();
        if let Some(task_id) = input.task_id {
            sub_contract.task_id = Set(task_id);
        }
        if let Some(subcontract_brief) = input.subcontract_brief {
            sub_contract.subcontract_brief = Set(subcontract_brief);
        }
        if let Some(weightage) = input.weightage {
            sub_contract.weightage = Set(weightage);
        }
        if let Some(status) = input.status {
            sub_contract.status = Set(status);
        }
        if let Some(due_date) = input.due_date {
            sub_contract.due_date = Set(due_date);
        }
        if let Some(assignee_id) = input.assignee_id {
            sub_contract.assignee_id = Set(assignee_id);
        }
        if let Some(remarks) = input.remarks {
            sub_contract.remarks = Set(remarks);
        }
        if let Some(completion_percentage) = input.completion_percentage {
            sub_contract.completion_percentage = Set(completion_percentage);
        }
        sub_contract.updated_at = Set(chrono::Utc::now().naive_utc());
        sub_contract.update(&self.db).await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = SubContractEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found("Subcontract", id));
        }

        Ok(())
    }

    async fn ensure_task(&self, task_id: &str) -> RepoResult<()> {
        TaskEntity::find_by_id(task_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Task", task_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_is_required_outside_nested_routes() {
        let input: CreateSubContract = serde_json::from_value(serde_json::json!({
            "subcontract_brief": "Print run",
            "weightage": 40,
            "due_date": "2026-04-10"
        }))
        .unwrap();
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("task_id"), Some(&vec![REQUIRED.to_string()]));
        assert!(!errors.has_error("subcontract_brief"));
    }

    #[test]
    fn weightage_outside_bounds_is_rejected() {
        let input: CreateSubContract = serde_json::from_value(serde_json::json!({
            "task_id": "t1",
            "subcontract_brief": "Print run",
            "weightage": 120,
            "due_date": "2026-04-10",
            "completion_percentage": -5
        }))
        .unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.has_error("weightage"));
        assert!(errors.has_error("completion_percentage"));
    }

    #[test]
    fn null_assignee_clears_it() {
        let input: UpdateSubContract =
            serde_json::from_value(serde_json::json!({"assignee_id": null})).unwrap();
        assert_eq!(input.assignee_id, Some(None));
    }
}
