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
    repos::sub_contracts::{
        CreateSubContract, SubContractFilter, SubContractView, SubContractsRepo, UpdateSubContract,
    },
    utils::response::{APIError, APIResponse},
};

pub async fn list_sub_contracts(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<SubContractFilter>, QueryRejection>,
) -> Result<Json<Vec<SubContractView>>, APIError> {
    let Query(filter) = filter?;

    let sub_contracts_repo = SubContractsRepo::new(state.database.clone());
    let sub_contracts = sub_contracts_repo.list(filter).await?;

    Ok(Json(sub_contracts))
}

pub async fn get_sub_contract(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SubContractView>, APIError> {
    let sub_contracts_repo = SubContractsRepo::new(state.database.clone());
    let sub_contract = sub_contracts_repo.get(&id).await?;

    Ok(Json(sub_contract))
}

pub async fn create_sub_contract(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateSubContract>, JsonRejection>,
) -> Result<(StatusCode, Json<SubContractView>), APIError> {
    let Json(payload) = payload?;

    let sub_contracts_repo = SubContractsRepo::new(state.database.clone());
    let sub_contract = sub_contracts_repo.create(payload).await?;
    info!(
        "Created subcontract {} under task {}",
        sub_contract.sub_contract.id, sub_contract.sub_contract.task_id
    );

    Ok((StatusCode::CREATED, Json(sub_contract)))
}

pub async fn update_sub_contract(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSubContract>, JsonRejection>,
) -> Result<Json<SubContractView>, APIError> {
    let Json(payload) = payload?;

    let sub_contracts_repo = SubContractsRepo::new(state.database.clone());
    let sub_contract = sub_contracts_repo.update(&id, payload).await?;

    Ok(Json(sub_contract))
}

pub async fn delete_sub_contract(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<APIResponse, APIError> {
    let sub_contracts_repo = SubContractsRepo::new(state.database.clone());
    sub_contracts_repo.delete(&id).await?;
    info!("Deleted subcontract {}", id);

    Ok(APIResponse::NoContent)
}
