use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::core::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceListResponse {
    services: Vec<String>,
}

/// The service names a client may be tagged with.
pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<ServiceListResponse> {
    Json(ServiceListResponse {
        services: state.catalog.list_services(),
    })
}
