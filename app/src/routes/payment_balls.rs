use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    core::state::AppState,
    handlers::payment_balls::{
        create_payment_ball, delete_payment_ball, generate_invoice, get_payment_ball,
        list_by_job_card, list_payment_balls, update_payment_ball,
    },
};

pub fn payment_ball_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_payment_balls).post(create_payment_ball))
        .route("/by-job-card", get(list_by_job_card))
        .route(
            "/:id",
            get(get_payment_ball)
                .put(update_payment_ball)
                .delete(delete_payment_ball),
        )
        .route("/:id/generate-invoice", post(generate_invoice))
}
