pub use sea_orm_migration::prelude::*;

mod m20260201_000000_clients;
mod m20260201_010000_rfqs_and_job_cards;
mod m20260201_020000_payment_balls;
mod m20260201_030000_tasks_and_subcontracts;
mod m20260215_000000_timesheets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260201_000000_clients::Migration),
            Box::new(m20260201_010000_rfqs_and_job_cards::Migration),
            Box::new(m20260201_020000_payment_balls::Migration),
            Box::new(m20260201_030000_tasks_and_subcontracts::Migration),
            Box::new(m20260215_000000_timesheets::Migration),
        ]
    }
}
