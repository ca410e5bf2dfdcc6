use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    core::state::AppState,
    models::employee::Model as Employee,
    repos::employees::{CreateEmployee, EmployeesRepo, UpdateEmployee},
    utils::response::{APIError, APIResponse},
};

pub async fn list_employees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, APIError> {
    let employees_repo = EmployeesRepo::new(state.database.clone());
    let employees = employees_repo.list().await?;

    Ok(Json(employees))
}

pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, APIError> {
    let employees_repo = EmployeesRepo::new(state.database.clone());
    let employee = employees_repo.get(&id).await?;

    Ok(Json(employee))
}

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateEmployee>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), APIError> {
    let Json(payload) = payload?;

    let employees_repo = EmployeesRepo::new(state.database.clone());
    let employee = employees_repo.create(payload).await?;
    info!("Created employee {} ({})", employee.name, employee.id);

    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEmployee>, JsonRejection>,
) -> Result<Json<Employee>, APIError> {
    let Json(payload) = payload?;

    let employees_repo = EmployeesRepo::new(state.database.clone());
    let employee = employees_repo.update(&id, payload).await?;

    Ok(Json(employee))
}

pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<APIResponse, APIError> {
    let employees_repo = EmployeesRepo::new(state.database.clone());
    employees_repo.delete(&id).await?;
    info!("Deleted employee {}", id);

    Ok(APIResponse::NoContent)
}
