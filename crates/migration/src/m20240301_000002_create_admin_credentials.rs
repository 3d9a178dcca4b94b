//! Create `admin_credentials` table with FK to `admin_user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminCredentials::Table)
                    .if_not_exists()
                    .col(uuid(AdminCredentials::UserId).primary_key())
                    .col(string_len(AdminCredentials::PasswordHash, 255).not_null())
                    .col(string_len(AdminCredentials::PasswordAlgorithm, 32).not_null())
                    .col(timestamp_with_time_zone(AdminCredentials::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_credentials_user")
                            .from(AdminCredentials::Table, AdminCredentials::UserId)
                            .to(AdminUser::Table, AdminUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AdminCredentials::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AdminCredentials { Table, UserId, PasswordHash, PasswordAlgorithm, UpdatedAt }

#[derive(DeriveIden)]
enum AdminUser { Table, Id }
