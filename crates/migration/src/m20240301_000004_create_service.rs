//! Create `service` table (public service catalog).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(string_len(Service::Title, 200).not_null())
                    .col(string_len(Service::Category, 50).not_null())
                    .col(text(Service::Description).not_null())
                    .col(string_len(Service::ShortDescription, 200).not_null())
                    .col(string_len(Service::Icon, 50).not_null())
                    .col(ColumnDef::new(Service::ImagePath).string_len(255).null())
                    .col(integer(Service::Position).not_null())
                    .col(boolean(Service::Active).not_null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    Title,
    Category,
    Description,
    ShortDescription,
    Icon,
    ImagePath,
    Position,
    Active,
    CreatedAt,
    UpdatedAt,
}
