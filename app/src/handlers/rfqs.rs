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
    repos::rfqs::{CreateRfq, RfqFilter, RfqView, RfqsRepo, UpdateRfq},
    utils::response::{APIError, APIResponse},
};

pub async fn list_rfqs(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<RfqFilter>, QueryRejection>,
) -> Result<Json<Vec<RfqView>>, APIError> {
    let Query(filter) = filter?;

    let rfqs_repo = RfqsRepo::new(state.database.clone());
    let rfqs = rfqs_repo.list(filter).await?;

    Ok(Json(rfqs))
}

pub async fn get_rfq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RfqView>, APIError> {
    let rfqs_repo = RfqsRepo::new(state.database.clone());
    let rfq = rfqs_repo.get(&id).await?;

    Ok(Json(rfq))
}

pub async fn create_rfq(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateRfq>, JsonRejection>,
) -> Result<(StatusCode, Json<RfqView>), APIError> {
    let Json(payload) = payload?;

    let rfqs_repo = RfqsRepo::new(state.database.clone());
    let rfq = rfqs_repo.create(payload).await?;
    info!("Created RFQ {} ({})", rfq.rfq.quotation_number, rfq.rfq.id);

    Ok((StatusCode::CREATED, Json(rfq)))
}

pub async fn update_rfq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRfq>, JsonRejection>,
) -> Result<Json<RfqView>, APIError> {
    let Json(payload) = payload?;

    let rfqs_repo = RfqsRepo::new(state.database.clone());
    let rfq = rfqs_repo.update(&id, payload).await?;

    Ok(Json(rfq))
}

pub async fn delete_rfq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<APIResponse, APIError> {
    let rfqs_repo = RfqsRepo::new(state.database.clone());
    rfqs_repo.delete(&id).await?;
    info!("Deleted RFQ {}", id);

    Ok(APIResponse::NoContent)
}
