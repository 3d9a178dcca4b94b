use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // MediaAsset: filter by kind on every picker view
        manager
            .create_index(
                Index::create()
                    .name("idx_media_asset_kind")
                    .table(MediaAsset::Table)
                    .col(MediaAsset::Kind)
                    .to_owned(),
            )
            .await?;

        // JobApplication: index on offer FK
        manager
            .create_index(
                Index::create()
                    .name("idx_job_application_offer")
                    .table(JobApplication::Table)
                    .col(JobApplication::JobOfferId)
                    .to_owned(),
            )
            .await?;

        // Activity: recency queries and per-object lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_activity_timestamp")
                    .table(Activity::Table)
                    .col(Activity::Timestamp)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_activity_object_type")
                    .table(Activity::Table)
                    .col(Activity::ObjectType)
                    .to_owned(),
            )
            .await?;

        // Contact: admin inbox sorts by processed flag then recency
        manager
            .create_index(
                Index::create()
                    .name("idx_contact_processed")
                    .table(Contact::Table)
                    .col(Contact::Processed)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_media_asset_kind").table(MediaAsset::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_job_application_offer").table(JobApplication::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_activity_timestamp").table(Activity::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_activity_object_type").table(Activity::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contact_processed").table(Contact::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MediaAsset { Table, Kind }

#[derive(DeriveIden)]
enum JobApplication { Table, JobOfferId }

#[derive(DeriveIden)]
enum Activity { Table, Timestamp, ObjectType }

#[derive(DeriveIden)]
enum Contact { Table, Processed }
