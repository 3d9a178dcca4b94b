//! Create `brand` table. Same shape as `partner`; brands are the
//! manufacturers shown on the home page, partners the business allies.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brand::Table)
                    .if_not_exists()
                    .col(uuid(Brand::Id).primary_key())
                    .col(string_len(Brand::Name, 100).not_null())
                    .col(string_len(Brand::WebsiteUrl, 255).not_null())
                    .col(string_len(Brand::LogoPath, 255).not_null())
                    .col(text(Brand::Description).not_null())
                    .col(integer(Brand::Position).not_null())
                    .col(boolean(Brand::Active).not_null())
                    .col(timestamp_with_time_zone(Brand::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Brand::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Brand::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Brand { Table, Id, Name, WebsiteUrl, LogoPath, Description, Position, Active, CreatedAt, UpdatedAt }
