use anyhow::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::{
    config::{catalog::Catalog, config::Config},
    core::state::AppState,
    database::{
        connect::{connect_database, run_migrations},
        seed::seed_employees,
    },
    routes::create_routers,
};

pub async fn create_server(config: Config) -> Result<(Router<()>, DatabaseConnection)> {
    let catalog = Catalog::load_or_default(&config.catalog_path)?;
    info!(
        "Loaded catalogue from {}: {} services, {} employees",
        config.catalog_path,
        catalog.services.len(),
        catalog.employees.len()
    );

    let db_conn = connect_database(config.clone()).await?;
    run_migrations(&db_conn).await?;
    seed_employees(&db_conn, &catalog).await?;

    let state = AppState {
        database: db_conn.clone(),
        config,
        catalog: Arc::new(catalog),
    };

    let app = create_routers(Arc::new(state));

    Ok((app, db_conn))
}
