//! Create `job_application` table with FK to `job_offer`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobApplication::Table)
                    .if_not_exists()
                    .col(uuid(JobApplication::Id).primary_key())
                    .col(uuid(JobApplication::JobOfferId).not_null())
                    .col(string_len(JobApplication::FirstName, 100).not_null())
                    .col(string_len(JobApplication::LastName, 100).not_null())
                    .col(string_len(JobApplication::Email, 255).not_null())
                    .col(ColumnDef::new(JobApplication::Phone).string_len(20).null())
                    .col(ColumnDef::new(JobApplication::Address).text().null())
                    .col(text(JobApplication::CoverLetter).not_null())
                    .col(string_len(JobApplication::ResumePath, 255).not_null())
                    .col(string_len(JobApplication::Status, 20).not_null())
                    .col(ColumnDef::new(JobApplication::Notes).text().null())
                    .col(timestamp_with_time_zone(JobApplication::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(JobApplication::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_application_offer")
                            .from(JobApplication::Table, JobApplication::JobOfferId)
                            .to(JobOffer::Table, JobOffer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(JobApplication::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum JobApplication {
    Table,
    Id,
    JobOfferId,
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

#[derive(DeriveIden)]
enum JobOffer { Table, Id }
