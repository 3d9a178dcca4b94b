//! Create `contact` table with optional FKs to `service` and `formation`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(uuid(Contact::Id).primary_key())
                    .col(string_len(Contact::Name, 100).not_null())
                    .col(string_len(Contact::Email, 255).not_null())
                    .col(ColumnDef::new(Contact::Phone).string_len(20).null())
                    .col(string_len(Contact::Subject, 200).not_null())
                    .col(text(Contact::Message).not_null())
                    .col(ColumnDef::new(Contact::ServiceId).uuid().null())
                    .col(ColumnDef::new(Contact::FormationId).uuid().null())
                    .col(boolean(Contact::Processed).not_null())
                    .col(timestamp_with_time_zone(Contact::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_service")
                            .from(Contact::Table, Contact::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_formation")
                            .from(Contact::Table, Contact::FormationId)
                            .to(Formation::Table, Formation::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contact::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contact {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Subject,
    Message,
    ServiceId,
    FormationId,
    Processed,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Service { Table, Id }

#[derive(DeriveIden)]
enum Formation { Table, Id }
