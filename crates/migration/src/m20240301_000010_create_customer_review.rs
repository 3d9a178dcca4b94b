//! Create `customer_review` table (testimonials shown on the about page).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerReview::Table)
                    .if_not_exists()
                    .col(uuid(CustomerReview::Id).primary_key())
                    .col(string_len(CustomerReview::Name, 100).not_null())
                    .col(ColumnDef::new(CustomerReview::Company).string_len(100).null())
                    .col(ColumnDef::new(CustomerReview::Role).string_len(100).null())
                    .col(text(CustomerReview::Comment).not_null())
                    .col(integer(CustomerReview::Rating).not_null())
                    .col(ColumnDef::new(CustomerReview::PhotoPath).string_len(255).null())
                    .col(integer(CustomerReview::Position).not_null())
                    .col(boolean(CustomerReview::Active).not_null())
                    .col(timestamp_with_time_zone(CustomerReview::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(CustomerReview::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CustomerReview::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CustomerReview {
    Table,
    Id,
    Name,
    Company,
    Role,
    Comment,
    Rating,
    PhotoPath,
    Position,
    Active,
    CreatedAt,
    UpdatedAt,
}
