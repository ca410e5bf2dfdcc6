use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    core::state::AppState,
    handlers::job_cards::{
        create_job_card, delete_job_card, get_job_card, list_job_cards, update_job_card,
    },
};

pub fn job_card_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_job_cards).post(create_job_card))
        .route(
            "/:id",
            get(get_job_card).put(update_job_card).delete(delete_job_card),
        )
}
