//! Create `activity` table (append-only audit trail of admin actions).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(big_integer(Activity::Id).primary_key().auto_increment())
                    .col(uuid(Activity::ActorId).not_null())
                    .col(string_len(Activity::Action, 20).not_null())
                    .col(string_len(Activity::ObjectType, 50).not_null())
                    .col(string_len(Activity::ObjectId, 100).not_null())
                    .col(text(Activity::Description).not_null())
                    .col(timestamp_with_time_zone(Activity::Timestamp).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_actor")
                            .from(Activity::Table, Activity::ActorId)
                            .to(AdminUser::Table, AdminUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Activity::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Activity { Table, Id, ActorId, Action, ObjectType, ObjectId, Description, Timestamp }

#[derive(DeriveIden)]
enum AdminUser { Table, Id }
