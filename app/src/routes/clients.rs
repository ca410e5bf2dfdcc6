use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    core::state::AppState,
    handlers::clients::{
        create_client, create_client_rfq, delete_client, get_client, list_client_rfqs,
        list_clients, update_client,
    },
};

pub fn client_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/:id/rfqs", get(list_client_rfqs).post(create_client_rfq))
}
