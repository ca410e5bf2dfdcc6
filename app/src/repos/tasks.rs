use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        payment_ball::{Entity as PaymentBallEntity, Model as PaymentBall},
        status::WorkStatus,
        task::{self, ActiveModel, Entity as TaskEntity, Model as Task},
    },
    repos::{employees::EmployeesRepo, RepoError, RepoResult},
    utils::{
        crypto::generate_id,
        serde_helpers::double_option,
        validation::{
            check_decimal, check_percentage, check_required, require, require_text,
            ValidationErrors,
        },
    },
};

/// Shared by tasks and subcontracts: both fields are NUMERIC(5,2) in [0, 100].
pub(crate) fn check_progress(
    errors: &mut ValidationErrors,
    weightage: Option<Decimal>,
    completion_percentage: Option<Decimal>,
) {
    if let Some(weightage) = weightage {
        check_percentage(errors, "weightage", weightage);
        check_decimal(errors, "weightage", weightage, 5, 2);
    }
    if let Some(completion_percentage) = completion_percentage {
        check_percentage(errors, "completion_percentage", completion_percentage);
        check_decimal(errors, "completion_percentage", completion_percentage, 5, 2);
    }
}

/// Required fields are optional here so that a missing one is reported as a
/// field error instead of a body parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTask {
    pub payment_ball_id: Option<String>,
    pub task_brief: Option<String>,
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

/// A create request that passed validation.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub payment_ball_id: String,
    pub task_brief: String,
    pub weightage: Decimal,
    pub status: WorkStatus,
    pub due_date: NaiveDate,
    pub assignee_id: Option<String>,
    pub remarks: Option<String>,
    pub completion_percentage: Decimal,
}

impl CreateTask {
    pub fn validate(self) -> Result<NewTask, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let payment_ball_id =
            require_text(&mut errors, "payment_ball_id", self.payment_ball_id, None);
        let task_brief = require_text(&mut errors, "task_brief", self.task_brief, None);
        let weightage = require(&mut errors, "weightage", self.weightage);
        let due_date = require(&mut errors, "due_date", self.due_date);
        check_progress(&mut errors, weightage, Some(self.completion_percentage));

        match (payment_ball_id, task_brief, weightage, due_date) {
            (Some(payment_ball_id), Some(task_brief), Some(weightage), Some(due_date))
                if errors.is_empty() =>
            {
                Ok(NewTask {
                    payment_ball_id,
                    task_brief,
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
pub struct UpdateTask {
    pub payment_ball_id: Option<String>,
    pub task_brief: Option<String>,
    pub weightage: Option<Decimal>,
    pub status: Option<WorkStatus>,
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub remarks: Option<Option<String>>,
    pub completion_percentage: Option<Decimal>,
}

impl UpdateTask {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(task_brief) = &self.task_brief {
            check_required(&mut errors, "task_brief", task_brief);
        }
        check_progress(&mut errors, self.weightage, self.completion_percentage);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub payment_ball: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentBallDetails {
    pub project_percentage: Decimal,
    pub project_status: WorkStatus,
}

impl From<PaymentBall> for PaymentBallDetails {
    fn from(payment_ball: PaymentBall) -> Self {
        Self {
            project_percentage: payment_ball.project_percentage,
            project_status: payment_ball.project_status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub assignee_name: Option<String>,
    pub payment_ball_details: Option<PaymentBallDetails>,
}

pub struct TasksRepo {
    db: DatabaseConnection,
}

impl TasksRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn employees(&self) -> EmployeesRepo {
        EmployeesRepo::new(self.db.clone())
    }

    /// Newest first.
    pub async fn list(&self, filter: TaskFilter) -> RepoResult<Vec<TaskView>> {
        let mut query = TaskEntity::find().find_also_related(PaymentBallEntity);
        if let Some(payment_ball_id) = filter.payment_ball {
            query = query.filter(task::Column::PaymentBallId.eq(payment_ball_id));
        }

        let tasks = query
            .order_by_desc(task::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let assignee_ids = tasks
            .iter()
            .filter_map(|(task, _)| task.assignee_id.clone())
            .collect();
        let names = self.employees().names_by_id(assignee_ids).await?;

        Ok(tasks
            .into_iter()
            .map(|(task, payment_ball)| {
                let assignee_name = task
                    .assignee_id
                    .as_ref()
                    .and_then(|id| names.get(id).cloned());
                TaskView {
                    task,
                    assignee_name,
                    payment_ball_details: payment_ball.map(PaymentBallDetails::from),
                }
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> RepoResult<TaskView> {
        let (task, payment_ball) = TaskEntity::find_by_id(id)
            .find_also_related(PaymentBallEntity)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("Task", id))?;

        let assignee_name = match &task.assignee_id {
            Some(assignee_id) => self
                .employees()
                .names_by_id(vec![assignee_id.clone()])
                .await?
                .remove(assignee_id),
            None => None,
        };

        Ok(TaskView {
            task,
            assignee_name,
            payment_ball_details: payment_ball.map(PaymentBallDetails::from),
        })
    }

    pub async fn get_model(&self, id: &str) -> RepoResult<Task> {
        TaskEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found("Task", id))
    }

    pub async fn create(&self, input: CreateTask) -> RepoResult<TaskView> {
        let input = input.validate()?;

        self.ensure_payment_ball(&input.payment_ball_id).await?;
        if let Some(assignee_id) = &input.assignee_id {
            self.employees().ensure_assignee(assignee_id).await?;
        }

        let now = chrono::Utc::now().naive_utc();
        let task_model = ActiveModel {
            id: Set(generate_id()),
            payment_ball_id: Set(input.payment_ball_id),
            task_brief: Set(input.task_brief),
            weightage: Set(input.weightage),
            status: Set(input.status),
            due_date: Set(input.due_date),
            assignee_id: Set(input.assignee_id),
            remarks: Set(input.remarks),
            completion_percentage: Set(input.completion_percentage),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let task = task_model.insert(&self.db).await?;

        self.get(&task.id).await
    }

    /// `updated_at` is stamped on every update, even one that changes nothing else.
    pub async fn update(&self, id: &str, input: UpdateTask) -> RepoResult<TaskView> {
        input.validate()?;

        let existing = self.get_model(id).await?;
        if let Some(payment_ball_id) = &input.payment_ball_id {
            self.ensure_payment_ball(payment_ball_id).await?;
        }
        if let Some(Some(assignee_id)) = &input.assignee_id {
            self.employees().ensure_assignee(assignee_id).await?;
        }

        let mut task: ActiveModel = existing.into();
        if let Some(payment_ball_id) = input.payment_ball_id {
            task.payment_ball_id = Set(payment_ball_id);
        }
        if let Some(task_brief) = input.task_brief {
            task.task_brief = Set(task_brief);
        }
        if let Some(weightage) = input.weightage {
            task.weightage = Set(weightage);
        }
        if let Some(status) = input.status {
            task.status = Set(status);
        }
        if let Some(due_date) = input.due_date {
            task.due_date = Set(due_date);
        }
        if let Some(assignee_id) = input.assignee_id {
            task.assignee_id = Set(assignee_id);
        }
        if let Some(remarks) = input.remarks {
            task.remarks = Set(remarks);
        }
        if let Some(completion_percentage) = input.completion_percentage {
            task.completion_percentage = Set(completion_percentage);
        }
        task.updated_at = Set(chrono::Utc::now().naive_utc());
        task.update(&self.db).await?;

        self.get(id).await
    }

    /// Cascades to the task's subcontracts.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = TaskEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found("Task", id));
        }

        Ok(())
    }

    async fn ensure_payment_ball(&self, payment_ball_id: &str) -> RepoResult<()> {
        PaymentBallEntity::find_by_id(payment_ball_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Payment ball", payment_ball_id))
    }
}
