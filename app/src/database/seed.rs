use sea_orm::DatabaseConnection;
use tracing::info;

use crate::{
    config::catalog::Catalog,
    repos::{
        employees::{CreateEmployee, EmployeesRepo},
        RepoResult,
    },
};

/// Creates the catalogue's employees that do not exist yet, matched by name.
pub async fn seed_employees(db: &DatabaseConnection, catalog: &Catalog) -> RepoResult<()> {
    let employees_repo = EmployeesRepo::new(db.clone());

    for seed in &catalog.employees {
        if employees_repo.get_by_name(&seed.name).await?.is_some() {
            continue;
        }

        let employee = employees_repo
            .create(CreateEmployee {
                name: Some(seed.name.clone()),
                email: seed.email.clone(),
            })
            .await?;
        info!("Seeded employee: {}", employee.name);
    }

    Ok(())
}
