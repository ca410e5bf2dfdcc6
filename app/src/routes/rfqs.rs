use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    core::state::AppState,
    handlers::rfqs::{create_rfq, delete_rfq, get_rfq, list_rfqs, update_rfq},
};

pub fn rfq_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_rfqs).post(create_rfq))
        .route("/:id", get(get_rfq).put(update_rfq).delete(delete_rfq))
}
