//! Create `media_asset` table with optional FK to `admin_user`.
//!
//! Uploaded images tracked independently of the content records that may
//! later receive a copy of them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaAsset::Table)
                    .if_not_exists()
                    .col(uuid(MediaAsset::Id).primary_key())
                    .col(string_len(MediaAsset::Name, 100).not_null())
                    .col(string_len(MediaAsset::Kind, 20).not_null())
                    .col(string_len(MediaAsset::FilePath, 255).not_null())
                    .col(text(MediaAsset::Description).not_null())
                    .col(boolean(MediaAsset::Active).not_null())
                    .col(integer(MediaAsset::Position).not_null())
                    .col(ColumnDef::new(MediaAsset::UploadedBy).uuid().null())
                    .col(timestamp_with_time_zone(MediaAsset::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(MediaAsset::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_asset_uploader")
                            .from(MediaAsset::Table, MediaAsset::UploadedBy)
                            .to(AdminUser::Table, AdminUser::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MediaAsset::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MediaAsset {
    Table,
    Id,
    Name,
    Kind,
    FilePath,
    Description,
    Active,
    Position,
    UploadedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AdminUser { Table, Id }
