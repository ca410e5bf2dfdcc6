use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{catalog::Catalog, config::Config};

#[derive(Clone, Debug)]
pub struct AppState {
    pub database: DatabaseConnection,
    pub config: Config,
    pub catalog: Arc<Catalog>,
}
