//! Create `spontaneous_application` table.
//!
//! Same applicant shape as `job_application` but not tied to an offer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SpontaneousApplication::Table)
                    .if_not_exists()
                    .col(uuid(SpontaneousApplication::Id).primary_key())
                    .col(string_len(SpontaneousApplication::FirstName, 100).not_null())
                    .col(string_len(SpontaneousApplication::LastName, 100).not_null())
                    .col(string_len(SpontaneousApplication::Email, 255).not_null())
                    .col(ColumnDef::new(SpontaneousApplication::Phone).string_len(20).null())
                    .col(ColumnDef::new(SpontaneousApplication::Address).text().null())
                    .col(text(SpontaneousApplication::CoverLetter).not_null())
                    .col(string_len(SpontaneousApplication::ResumePath, 255).not_null())
                    .col(string_len(SpontaneousApplication::Status, 20).not_null())
                    .col(ColumnDef::new(SpontaneousApplication::Notes).text().null())
                    .col(timestamp_with_time_zone(SpontaneousApplication::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(SpontaneousApplication::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SpontaneousApplication::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SpontaneousApplication {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    CoverLetter,
    ResumePath,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}
