use sea_orm_migration::prelude::*;

use crate::m20260201_010000_rfqs_and_job_cards::JobCards;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentBalls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentBalls::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentBalls::JobCardId).string().not_null())
                    .col(
                        ColumnDef::new(PaymentBalls::ProjectPercentage)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentBalls::ProjectStatus)
                            .string_len(50)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(PaymentBalls::Notes).text().null())
                    .col(
                        ColumnDef::new(PaymentBalls::ColorStatus)
                            .string_len(6)
                            .not_null()
                            .default("gray"),
                    )
                    .col(ColumnDef::new(PaymentBalls::InvoiceNumber).string_len(20).null())
                    .col(
                        ColumnDef::new(PaymentBalls::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentBalls::PaymentTerms).text().null())
                    .col(
                        ColumnDef::new(PaymentBalls::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_balls_job_cards")
                            .from(PaymentBalls::Table, PaymentBalls::JobCardId)
                            .to(JobCards::Table, JobCards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_balls_job_card_id")
                    .table(PaymentBalls::Table)
                    .col(PaymentBalls::JobCardId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentBalls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PaymentBalls {
    Table,
    Id,
    JobCardId,
    ProjectPercentage,
    ProjectStatus,
    Notes,
    ColorStatus,
    InvoiceNumber,
    Amount,
    PaymentTerms,
    CreatedAt,
}
