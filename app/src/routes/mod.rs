pub mod clients;
pub mod employees;
pub mod job_cards;
pub mod payment_balls;
pub mod rfqs;
pub mod sub_contracts;
pub mod tasks;
pub mod timesheets;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::{
    core::state::AppState,
    handlers::catalog::list_services,
    routes::{
        clients::client_routes, employees::employee_routes, job_cards::job_card_routes,
        payment_balls::payment_ball_routes, rfqs::rfq_routes, sub_contracts::sub_contract_routes,
        tasks::task_routes, timesheets::timesheet_routes,
    },
    utils::response::APIResponse,
};

pub fn create_routers(state: Arc<AppState>) -> Router<()> {
    let api_routes = Router::new()
        .nest("/clients", client_routes())
        .nest("/rfqs", rfq_routes())
        .nest("/job-cards", job_card_routes())
        .nest("/payment-balls", payment_ball_routes())
        .nest("/tasks", task_routes())
        .nest("/subcontracts", sub_contract_routes())
        .nest("/employees", employee_routes())
        .nest("/timesheets", timesheet_routes())
        .route("/services", get(list_services));

    let cors = cors_layer(state.config.cors_origin.as_deref());

    Router::new()
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> APIResponse {
    APIResponse::NotFound("Not Found".to_string())
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.map(str::parse::<HeaderValue>) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            warn!("Ignoring invalid CORS_ORIGIN: {}", e);
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}
