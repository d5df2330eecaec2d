//! Migration: Create instructor_applications table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InstructorApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InstructorApplications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InstructorApplications::Name).string().not_null())
                    .col(ColumnDef::new(InstructorApplications::Email).string().not_null())
                    .col(ColumnDef::new(InstructorApplications::Experience).text().null())
                    .col(
                        ColumnDef::new(InstructorApplications::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(InstructorApplications::Reason).text().null())
                    .col(
                        ColumnDef::new(InstructorApplications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(InstructorApplications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_instructor_applications_email")
                    .table(InstructorApplications::Table)
                    .col(InstructorApplications::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InstructorApplications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum InstructorApplications {
    Table,
    Id,
    Name,
    Email,
    Experience,
    Status,
    Reason,
    CreatedAt,
    UpdatedAt,
}
