use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    core::state::AppState,
    repos::{
        sub_contracts::{CreateSubContract, SubContractFilter, SubContractView, SubContractsRepo},
        tasks::{CreateTask, TaskFilter, TaskView, TasksRepo, UpdateTask},
    },
    utils::response::{APIError, APIResponse},
};

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<TaskFilter>, QueryRejection>,
) -> Result<Json<Vec<TaskView>>, APIError> {
    let Query(filter) = filter?;

    let tasks_repo = TasksRepo::new(state.database.clone());
    let tasks = tasks_repo.list(filter).await?;

    Ok(Json(tasks))
}

/// Same as the filtered list, but the payment ball is mandatory.
pub async fn list_by_payment_ball(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<TaskFilter>, QueryRejection>,
) -> Result<Json<Vec<TaskView>>, APIError> {
    let Query(filter) = filter?;
    if filter.payment_ball.as_deref().map_or(true, str::is_empty) {
        return Err(APIError::BadRequest(
            "payment_ball parameter is required".to_string(),
        ));
    }

    let tasks_repo = TasksRepo::new(state.database.clone());
    let tasks = tasks_repo.list(filter).await?;

    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TaskView>, APIError> {
    let tasks_repo = TasksRepo::new(state.database.clone());
    let task = tasks_repo.get(&id).await?;

    Ok(Json(task))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskView>), APIError> {
    let Json(payload) = payload?;

    let tasks_repo = TasksRepo::new(state.database.clone());
    let task = tasks_repo.create(payload).await?;
    info!(
        "Created task {} under payment ball {}",
        task.task.id, task.task.payment_ball_id
    );

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<Json<TaskView>, APIError> {
    let Json(payload) = payload?;

    let tasks_repo = TasksRepo::new(state.database.clone());
    let task = tasks_repo.update(&id, payload).await?;

    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<APIResponse, APIError> {
    let tasks_repo = TasksRepo::new(state.database.clone());
    tasks_repo.delete(&id).await?;
    info!("Deleted task {}", id);

    Ok(APIResponse::NoContent)
}

/// Subcontracted work under one task.
pub async fn list_task_subcontracts(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<Json<Vec<SubContractView>>, APIError> {
    TasksRepo::new(state.database.clone())
        .get_model(&task_id)
        .await?;

    let sub_contracts_repo = SubContractsRepo::new(state.database.clone());
    let sub_contracts = sub_contracts_repo
        .list(SubContractFilter {
            task: Some(task_id),
        })
        .await?;

    Ok(Json(sub_contracts))
}

/// Creates a subcontract under the task named in the path, ignoring any
/// `task_id` in the body.
pub async fn create_task_subcontract(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
    payload: Result<Json<CreateSubContract>, JsonRejection>,
) -> Result<(StatusCode, Json<SubContractView>), APIError> {
    let Json(mut payload) = payload?;
    payload.task_id = Some(task_id);

    let sub_contracts_repo = SubContractsRepo::new(state.database.clone());
    let sub_contract = sub_contracts_repo.create(payload).await?;
    info!(
        "Created subcontract {} under task {}",
        sub_contract.sub_contract.id, sub_contract.sub_contract.task_id
    );

    Ok((StatusCode::CREATED, Json(sub_contract)))
}
