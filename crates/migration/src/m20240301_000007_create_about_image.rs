//! Create `about_image` table (about section slides).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AboutImage::Table)
                    .if_not_exists()
                    .col(uuid(AboutImage::Id).primary_key())
                    .col(string_len(AboutImage::Title, 100).not_null())
                    .col(ColumnDef::new(AboutImage::Description).string_len(200).null())
                    .col(string_len(AboutImage::ImagePath, 255).not_null())
                    .col(integer(AboutImage::Position).not_null())
                    .col(boolean(AboutImage::Active).not_null())
                    .col(timestamp_with_time_zone(AboutImage::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(AboutImage::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AboutImage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AboutImage { Table, Id, Title, Description, ImagePath, Position, Active, CreatedAt, UpdatedAt }
