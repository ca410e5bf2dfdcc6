use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    core::state::AppState,
    handlers::tasks::{
        create_task, create_task_subcontract, delete_task, get_task, list_by_payment_ball,
        list_task_subcontracts, list_tasks, update_task,
    },
};

pub fn task_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/by-payment-ball", get(list_by_payment_ball))
        .route("/:id", get(get_task).put(update_task).delete(delete_task))
        .route(
            "/:id/subcontracts",
            get(list_task_subcontracts).post(create_task_subcontract),
        )
}
