use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    core::state::AppState,
    models::timesheet::Model as Timesheet,
    repos::timesheets::{CreateTimesheet, TimesheetsRepo, UpdateTimesheet},
    utils::response::{APIError, APIResponse},
};

pub async fn list_timesheets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Timesheet>>, APIError> {
    let timesheets_repo = TimesheetsRepo::new(state.database.clone());
    let timesheets = timesheets_repo.list().await?;

    Ok(Json(timesheets))
}

pub async fn get_timesheet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Timesheet>, APIError> {
    let timesheets_repo = TimesheetsRepo::new(state.database.clone());
    let timesheet = timesheets_repo.get(&id).await?;

    Ok(Json(timesheet))
}

pub async fn create_timesheet(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTimesheet>, JsonRejection>,
) -> Result<(StatusCode, Json<Timesheet>), APIError> {
    let Json(payload) = payload?;

    let timesheets_repo = TimesheetsRepo::new(state.database.clone());
    let timesheet = timesheets_repo.create(payload).await?;
    info!(
        "Logged {} hours on {} ({})",
        timesheet.hours_logged, timesheet.date_logged, timesheet.id
    );

    Ok((StatusCode::CREATED, Json(timesheet)))
}

pub async fn update_timesheet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTimesheet>, JsonRejection>,
) -> Result<Json<Timesheet>, APIError> {
    let Json(payload) = payload?;

    let timesheets_repo = TimesheetsRepo::new(state.database.clone());
    let timesheet = timesheets_repo.update(&id, payload).await?;

    Ok(Json(timesheet))
}

pub async fn delete_timesheet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<APIResponse, APIError> {
    let timesheets_repo = TimesheetsRepo::new(state.database.clone());
    timesheets_repo.delete(&id).await?;

    Ok(APIResponse::NoContent)
}
