//! Create `carousel_image` table (home page carousel slides).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CarouselImage::Table)
                    .if_not_exists()
                    .col(uuid(CarouselImage::Id).primary_key())
                    .col(string_len(CarouselImage::Title, 100).not_null())
                    .col(ColumnDef::new(CarouselImage::Description).string_len(200).null())
                    .col(string_len(CarouselImage::ImagePath, 255).not_null())
                    .col(integer(CarouselImage::Position).not_null())
                    .col(boolean(CarouselImage::Active).not_null())
                    .col(timestamp_with_time_zone(CarouselImage::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(CarouselImage::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CarouselImage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CarouselImage { Table, Id, Title, Description, ImagePath, Position, Active, CreatedAt, UpdatedAt }
