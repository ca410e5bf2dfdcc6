use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    core::state::AppState,
    handlers::sub_contracts::{
        create_sub_contract, delete_sub_contract, get_sub_contract, list_sub_contracts,
        update_sub_contract,
    },
};

pub fn sub_contract_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_sub_contracts).post(create_sub_contract))
        .route(
            "/:id",
            get(get_sub_contract)
                .put(update_sub_contract)
                .delete(delete_sub_contract),
        )
}
