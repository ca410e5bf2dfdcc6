use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::{
    core::state::AppState,
    repos::job_cards::{CreateJobCard, JobCardFilter, JobCardView, JobCardsRepo, UpdateJobCard},
    utils::response::{APIError, APIResponse},
};

pub async fn list_job_cards(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<JobCardFilter>, QueryRejection>,
) -> Result<Json<Vec<JobCardView>>, APIError> {
    let Query(filter) = filter?;

    let job_cards_repo = JobCardsRepo::new(state.database.clone());
    let job_cards = job_cards_repo.list(filter).await?;

    Ok(Json(job_cards))
}

pub async fn get_job_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JobCardView>, APIError> {
    let job_cards_repo = JobCardsRepo::new(state.database.clone());
    let job_card = job_cards_repo.get(&id).await?;

    Ok(Json(job_card))
}

pub async fn create_job_card(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateJobCard>, JsonRejection>,
) -> Result<(StatusCode, Json<JobCardView>), APIError> {
    let Json(payload) = payload?;

    let job_cards_repo = JobCardsRepo::new(state.database.clone());
    let job_card = job_cards_repo.create(payload).await.map_err(|e| {
        if let Some(errors) = e.validation_errors() {
            warn!("Rejected job card: {:?}", errors);
        }
        e
    })?;
    info!("Created job card {} ({})", job_card.job_number, job_card.id);

    Ok((StatusCode::CREATED, Json(job_card)))
}

pub async fn update_job_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateJobCard>, JsonRejection>,
) -> Result<Json<JobCardView>, APIError> {
    let Json(payload) = payload?;

    let job_cards_repo = JobCardsRepo::new(state.database.clone());
    let job_card = job_cards_repo.update(&id, payload).await.map_err(|e| {
        if let Some(errors) = e.validation_errors() {
            warn!("Rejected update to job card {}: {:?}", id, errors);
        }
        e
    })?;

    Ok(Json(job_card))
}

pub async fn delete_job_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<APIResponse, APIError> {
    let job_cards_repo = JobCardsRepo::new(state.database.clone());
    job_cards_repo.delete(&id).await?;
    info!("Deleted job card {} and its payment balls", id);

    Ok(APIResponse::NoContent)
}
