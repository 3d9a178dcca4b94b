//! Create `site_config` table.
//!
//! Site-wide branding, hero/about copy, contact details and social links.
//! At most one row is active; the service layer enforces that on write.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteConfig::Table)
                    .if_not_exists()
                    .col(uuid(SiteConfig::Id).primary_key())
                    .col(string_len(SiteConfig::SiteName, 100).not_null())
                    .col(ColumnDef::new(SiteConfig::LogoPath).string_len(255).null())
                    .col(string_len(SiteConfig::HeroTitle, 200).not_null())
                    .col(string_len(SiteConfig::HeroSubtitle, 500).not_null())
                    .col(ColumnDef::new(SiteConfig::HeroImagePath).string_len(255).null())
                    .col(string_len(SiteConfig::AboutTitle, 200).not_null())
                    .col(string_len(SiteConfig::AboutDescription, 1000).not_null())
                    .col(ColumnDef::new(SiteConfig::AboutImagePath).string_len(255).null())
                    .col(string_len(SiteConfig::Phone, 20).not_null())
                    .col(string_len(SiteConfig::Email, 255).not_null())
                    .col(text(SiteConfig::Address).not_null())
                    .col(ColumnDef::new(SiteConfig::FacebookUrl).string_len(255).null())
                    .col(ColumnDef::new(SiteConfig::TwitterUrl).string_len(255).null())
                    .col(ColumnDef::new(SiteConfig::LinkedinUrl).string_len(255).null())
                    .col(ColumnDef::new(SiteConfig::InstagramUrl).string_len(255).null())
                    .col(string_len(SiteConfig::MetaTitle, 60).not_null())
                    .col(string_len(SiteConfig::MetaDescription, 160).not_null())
                    .col(boolean(SiteConfig::Active).not_null())
                    .col(timestamp_with_time_zone(SiteConfig::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(SiteConfig::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SiteConfig::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SiteConfig {
    Table,
    Id,
    SiteName,
    LogoPath,
    HeroTitle,
    HeroSubtitle,
    HeroImagePath,
    AboutTitle,
    AboutDescription,
    AboutImagePath,
    Phone,
    Email,
    Address,
    FacebookUrl,
    TwitterUrl,
    LinkedinUrl,
    InstagramUrl,
    MetaTitle,
    MetaDescription,
    Active,
    CreatedAt,
    UpdatedAt,
}
