use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    core::state::AppState,
    handlers::timesheets::{
        create_timesheet, delete_timesheet, get_timesheet, list_timesheets, update_timesheet,
    },
};

pub fn timesheet_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_timesheets).post(create_timesheet))
        .route(
            "/:id",
            get(get_timesheet)
                .put(update_timesheet)
                .delete(delete_timesheet),
        )
}
