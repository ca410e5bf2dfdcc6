#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::Router;
use chrono::NaiveDate;
use jobtracker::{
    config::{
        catalog::{Catalog, SeedEmployee},
        config::Config,
    },
    core::state::AppState,
    database::connect::{connect_database, run_migrations},
    models::{client::Model as Client, employee::Model as Employee},
    repos::{
        clients::{ClientsRepo, CreateClient},
        employees::{CreateEmployee, EmployeesRepo},
        job_cards::{CreateJobCard, JobCardView, JobCardsRepo},
        rfqs::{CreateRfq, RfqView, RfqsRepo},
    },
    routes::create_routers,
    utils::crypto::generate_id,
};
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

/// A fresh in-memory database with every migration applied. A single
/// connection keeps the in-memory database alive and shared.
pub async fn setup_db() -> DatabaseConnection {
    let mut config = Config::for_database("sqlite::memory:");
    config.max_connections = 1;
    config.min_connections = 1;

    let db = connect_database(config)
        .await
        .expect("in-memory sqlite connects");
    run_migrations(&db).await.expect("migrations apply");
    db
}

/// A migrated database in a temporary file, for tests that need several
/// pooled connections to race each other. Returns the file path for cleanup.
pub async fn setup_file_db(max_connections: u32) -> (DatabaseConnection, PathBuf) {
    let path = std::env::temp_dir().join(format!("jobtracker-{}.db", generate_id()));
    let mut config = Config::for_database(format!("sqlite://{}?mode=rwc", path.display()));
    config.max_connections = max_connections;
    config.min_connections = max_connections;

    let db = connect_database(config)
        .await
        .expect("file-backed sqlite connects");
    run_migrations(&db).await.expect("migrations apply");
    (db, path)
}

pub fn remove_file_db(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

pub fn test_catalog() -> Catalog {
    Catalog {
        services: vec!["Architecture".to_string(), "Interior Design".to_string()],
        employees: vec![SeedEmployee {
            name: "Asha".to_string(),
            email: Some("asha@example.com".to_string()),
        }],
    }
}

pub async fn setup_app() -> (Router, DatabaseConnection) {
    let db = setup_db().await;
    let state = AppState {
        database: db.clone(),
        config: Config::for_database("sqlite::memory:"),
        catalog: Arc::new(test_catalog()),
    };

    (create_routers(Arc::new(state)), db)
}

pub struct Hierarchy {
    pub client: Client,
    pub rfq: RfqView,
    pub job_card: JobCardView,
}

pub async fn create_hierarchy(db: &DatabaseConnection) -> Hierarchy {
    let client = ClientsRepo::new(db.clone())
        .create(
            CreateClient {
                client_name: Some("Meera Nair".to_string()),
                contact_info: Some("+91 98450 00000".to_string()),
                company_name: Some("Nair Estates".to_string()),
                service: Some("Architecture".to_string()),
                about: None,
                status: true,
            },
            &test_catalog(),
        )
        .await
        .expect("client is created");

    let rfq = RfqsRepo::new(db.clone())
        .create(CreateRfq {
            client_id: Some(client.id.clone()),
            project_type: Some("Residential".to_string()),
            scope_of_work: Some("Villa, G+1".to_string()),
            quotation_number: Some("Q-2026-001".to_string()),
            quotation_amount: Some(dec!(250000)),
            ..Default::default()
        })
        .await
        .expect("rfq is created");

    let job_card = JobCardsRepo::new(db.clone())
        .create(CreateJobCard {
            rfq_id: Some(rfq.rfq.id.clone()),
            job_number: Some("JC-001".to_string()),
            scope_of_work: Some("Design and build".to_string()),
            delivery_timelines: Some(date(2026, 6, 30)),
            ..Default::default()
        })
        .await
        .expect("job card is created");

    Hierarchy {
        client,
        rfq,
        job_card,
    }
}

pub async fn create_employee(db: &DatabaseConnection, name: &str) -> Employee {
    EmployeesRepo::new(db.clone())
        .create(CreateEmployee {
            name: Some(name.to_string()),
            email: None,
        })
        .await
        .expect("employee is created")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
