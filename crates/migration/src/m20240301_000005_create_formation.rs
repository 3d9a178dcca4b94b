//! Create `formation` table (training catalog).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Formation::Table)
                    .if_not_exists()
                    .col(uuid(Formation::Id).primary_key())
                    .col(string_len(Formation::Title, 200).not_null())
                    .col(string_len(Formation::Category, 50).not_null())
                    .col(string_len(Formation::Level, 20).not_null())
                    .col(text(Formation::Description).not_null())
                    .col(text(Formation::Objectives).not_null())
                    .col(text(Formation::Program).not_null())
                    .col(string_len(Formation::Duration, 100).not_null())
                    .col(double(Formation::Price).not_null())
                    .col(ColumnDef::new(Formation::ImagePath).string_len(255).null())
                    .col(boolean(Formation::Active).not_null())
                    .col(timestamp_with_time_zone(Formation::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Formation::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Formation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Formation {
    Table,
    Id,
    Title,
    Category,
    Level,
    Description,
    Objectives,
    Program,
    Duration,
    Price,
    ImagePath,
    Active,
    CreatedAt,
    UpdatedAt,
}
