//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_admin_user;
mod m20240301_000002_create_admin_credentials;
mod m20240301_000003_create_site_config;
mod m20240301_000004_create_service;
mod m20240301_000005_create_formation;
mod m20240301_000006_create_carousel_image;
mod m20240301_000007_create_about_image;
mod m20240301_000008_create_partner;
mod m20240301_000009_create_brand;
mod m20240301_000010_create_customer_review;
mod m20240301_000011_create_job_offer;
mod m20240301_000012_create_job_application;
mod m20240301_000013_create_spontaneous_application;
mod m20240301_000014_create_contact;
mod m20240301_000015_create_media_asset;
mod m20240301_000016_create_activity;
mod m20240301_000017_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_admin_user::Migration),
            Box::new(m20240301_000002_create_admin_credentials::Migration),
            Box::new(m20240301_000003_create_site_config::Migration),
            Box::new(m20240301_000004_create_service::Migration),
            Box::new(m20240301_000005_create_formation::Migration),
            Box::new(m20240301_000006_create_carousel_image::Migration),
            Box::new(m20240301_000007_create_about_image::Migration),
            Box::new(m20240301_000008_create_partner::Migration),
            Box::new(m20240301_000009_create_brand::Migration),
            Box::new(m20240301_000010_create_customer_review::Migration),
            Box::new(m20240301_000011_create_job_offer::Migration),
            Box::new(m20240301_000012_create_job_application::Migration),
            Box::new(m20240301_000013_create_spontaneous_application::Migration),
            Box::new(m20240301_000014_create_contact::Migration),
            Box::new(m20240301_000015_create_media_asset::Migration),
            Box::new(m20240301_000016_create_activity::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000017_add_indexes::Migration),
        ]
    }
}
