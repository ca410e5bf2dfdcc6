use sea_orm_migration::prelude::*;

use crate::m20260201_000000_clients::Clients;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // rfqs
        manager
            .create_table(
                Table::create()
                    .table(Rfqs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rfqs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rfqs::ClientId).string().not_null())
                    .col(
                        ColumnDef::new(Rfqs::RfqDate)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Rfqs::ProjectType).string_len(255).not_null())
                    .col(ColumnDef::new(Rfqs::ScopeOfWork).text().not_null())
                    .col(
                        ColumnDef::new(Rfqs::QuotationNumber)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Rfqs::QuotationAmount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Rfqs::Remarks).text().null())
                    .col(
                        ColumnDef::new(Rfqs::Status)
                            .string_len(50)
                            .not_null()
                            .default("Pending"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rfqs_clients")
                            .from(Rfqs::Table, Rfqs::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // job_cards
        manager
            .create_table(
                Table::create()
                    .table(JobCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobCards::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JobCards::RfqId).string().not_null())
                    .col(
                        ColumnDef::new(JobCards::JobNumber)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(JobCards::ScopeOfWork).text().not_null())
                    .col(ColumnDef::new(JobCards::DeliveryTimelines).date().not_null())
                    .col(ColumnDef::new(JobCards::PaymentTerms).text().null())
                    .col(
                        ColumnDef::new(JobCards::Status)
                            .string_len(50)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(JobCards::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(JobCards::ColorStatus)
                            .string_len(6)
                            .not_null()
                            .default("gray"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_cards_rfqs")
                            .from(JobCards::Table, JobCards::RfqId)
                            .to(Rfqs::Table, Rfqs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rfqs_client_id")
                    .table(Rfqs::Table)
                    .col(Rfqs::ClientId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_job_cards_rfq_id")
                    .table(JobCards::Table)
                    .col(JobCards::RfqId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobCards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rfqs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Rfqs {
    Table,
    Id,
    ClientId,
    RfqDate,
    ProjectType,
    ScopeOfWork,
    QuotationNumber,
    QuotationAmount,
    Remarks,
    Status,
}

#[derive(DeriveIden)]
pub enum JobCards {
    Table,
    Id,
    RfqId,
    JobNumber,
    ScopeOfWork,
    DeliveryTimelines,
    PaymentTerms,
    Status,
    CreatedAt,
    ColorStatus,
}
