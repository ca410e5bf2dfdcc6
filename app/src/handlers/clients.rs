use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    core::state::AppState,
    models::client::Model as Client,
    repos::{
        clients::{ClientsRepo, CreateClient, UpdateClient},
        rfqs::{CreateRfq, RfqFilter, RfqView, RfqsRepo},
    },
    utils::response::{APIError, APIResponse},
};

pub async fn list_clients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Client>>, APIError> {
    let clients_repo = ClientsRepo::new(state.database.clone());
    let clients = clients_repo.list().await?;

    Ok(Json(clients))
}

pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Client>, APIError> {
    let clients_repo = ClientsRepo::new(state.database.clone());
    let client = clients_repo.get(&id).await?;

    Ok(Json(client))
}

pub async fn create_client(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateClient>, JsonRejection>,
) -> Result<(StatusCode, Json<Client>), APIError> {
    let Json(payload) = payload?;

    let clients_repo = ClientsRepo::new(state.database.clone());
    let client = clients_repo.create(payload, &state.catalog).await?;
    info!("Created client {} ({})", client.client_name, client.id);

    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn update_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateClient>, JsonRejection>,
) -> Result<Json<Client>, APIError> {
    let Json(payload) = payload?;

    let clients_repo = ClientsRepo::new(state.database.clone());
    let client = clients_repo.update(&id, payload, &state.catalog).await?;

    Ok(Json(client))
}

pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<APIResponse, APIError> {
    let clients_repo = ClientsRepo::new(state.database.clone());
    clients_repo.delete(&id).await?;
    info!("Deleted client {}", id);

    Ok(APIResponse::NoContent)
}

/// RFQs of one client.
pub async fn list_client_rfqs(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> Result<Json<Vec<RfqView>>, APIError> {
    ClientsRepo::new(state.database.clone())
        .get(&client_id)
        .await?;

    let rfqs_repo = RfqsRepo::new(state.database.clone());
    let rfqs = rfqs_repo
        .list(RfqFilter {
            client: Some(client_id),
            ..Default::default()
        })
        .await?;

    Ok(Json(rfqs))
}

/// Creates an RFQ for the client named in the path, ignoring any `client_id`
/// in the body.
pub async fn create_client_rfq(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    payload: Result<Json<CreateRfq>, JsonRejection>,
) -> Result<(StatusCode, Json<RfqView>), APIError> {
    let Json(mut payload) = payload?;
    payload.client_id = Some(client_id);

    let rfqs_repo = RfqsRepo::new(state.database.clone());
    let rfq = rfqs_repo.create(payload).await?;
    info!(
        "Created RFQ {} for client {}",
        rfq.rfq.quotation_number, rfq.rfq.client_id
    );

    Ok((StatusCode::CREATED, Json(rfq)))
}
