use sea_orm_migration::prelude::*;

use crate::{
    m20260201_000000_clients::Employees, m20260201_020000_payment_balls::PaymentBalls,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // tasks
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tasks::PaymentBallId).string().not_null())
                    .col(ColumnDef::new(Tasks::TaskBrief).text().not_null())
                    .col(ColumnDef::new(Tasks::Weightage).decimal_len(5, 2).not_null())
                    .col(
                        ColumnDef::new(Tasks::Status)
                            .string_len(50)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Tasks::DueDate).date().not_null())
                    .col(ColumnDef::new(Tasks::AssigneeId).string().null())
                    .col(ColumnDef::new(Tasks::Remarks).text().null())
                    .col(
                        ColumnDef::new(Tasks::CompletionPercentage)
                            .decimal_len(5, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tasks::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tasks::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_payment_balls")
                            .from(Tasks::Table, Tasks::PaymentBallId)
                            .to(PaymentBalls::Table, PaymentBalls::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_assignee")
                            .from(Tasks::Table, Tasks::AssigneeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // sub_contracts
        manager
            .create_table(
                Table::create()
                    .table(SubContracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubContracts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubContracts::TaskId).string().not_null())
                    .col(ColumnDef::new(SubContracts::SubcontractBrief).text().not_null())
                    .col(
                        ColumnDef::new(SubContracts::Weightage)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubContracts::Status)
                            .string_len(50)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(SubContracts::DueDate).date().not_null())
                    .col(ColumnDef::new(SubContracts::AssigneeId).string().null())
                    .col(ColumnDef::new(SubContracts::Remarks).text().null())
                    .col(
                        ColumnDef::new(SubContracts::CompletionPercentage)
                            .decimal_len(5, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SubContracts::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SubContracts::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_contracts_tasks")
                            .from(SubContracts::Table, SubContracts::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_contracts_assignee")
                            .from(SubContracts::Table, SubContracts::AssigneeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_payment_ball_id")
                    .table(Tasks::Table)
                    .col(Tasks::PaymentBallId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_sub_contracts_task_id")
                    .table(SubContracts::Table)
                    .col(SubContracts::TaskId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubContracts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tasks {
    Table,
    Id,
    PaymentBallId,
    TaskBrief,
    Weightage,
    Status,
    DueDate,
    AssigneeId,
    Remarks,
    CompletionPercentage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum SubContracts {
    Table,
    Id,
    TaskId,
    SubcontractBrief,
    Weightage,
    Status,
    DueDate,
    AssigneeId,
    Remarks,
    CompletionPercentage,
    CreatedAt,
    UpdatedAt,
}
