//! Create `job_offer` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobOffer::Table)
                    .if_not_exists()
                    .col(uuid(JobOffer::Id).primary_key())
                    .col(string_len(JobOffer::Title, 200).not_null())
                    .col(text(JobOffer::Description).not_null())
                    .col(text(JobOffer::Missions).not_null())
                    .col(text(JobOffer::Profile).not_null())
                    .col(text(JobOffer::Benefits).not_null())
                    .col(string_len(JobOffer::ContractType, 20).not_null())
                    .col(string_len(JobOffer::Location, 100).not_null())
                    .col(ColumnDef::new(JobOffer::SalaryMin).double().null())
                    .col(ColumnDef::new(JobOffer::SalaryMax).double().null())
                    .col(ColumnDef::new(JobOffer::MinExperience).string_len(50).null())
                    .col(ColumnDef::new(JobOffer::StartDate).date().null())
                    .col(ColumnDef::new(JobOffer::Deadline).date().null())
                    .col(boolean(JobOffer::Urgent).not_null())
                    .col(integer(JobOffer::Position).not_null())
                    .col(boolean(JobOffer::Active).not_null())
                    .col(timestamp_with_time_zone(JobOffer::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(JobOffer::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(JobOffer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum JobOffer {
    Table,
    Id,
    Title,
    Description,
    Missions,
    Profile,
    Benefits,
    ContractType,
    Location,
    SalaryMin,
    SalaryMax,
    MinExperience,
    StartDate,
    Deadline,
    Urgent,
    Position,
    Active,
    CreatedAt,
    UpdatedAt,
}
