//! Counters for the dashboard landing page.

use std::collections::BTreeMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

use crate::errors::ServiceError;
use crate::pagination::Pagination;

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub services_total: u64,
    pub services_active: u64,
    pub services_without_images: u64,
    pub formations_total: u64,
    pub formations_active: u64,
    pub formations_without_images: u64,
    pub carousel_slides: u64,
    pub about_slides: u64,
    pub partners: u64,
    pub brands: u64,
    pub reviews: u64,
    pub job_offers_active: u64,
    pub applications_pending: u64,
    pub spontaneous_pending: u64,
    pub contacts_unprocessed: u64,
    pub media_assets: u64,
    /// Active registry assets per kind tag, for the sync picker widget.
    pub media_by_kind: BTreeMap<String, u64>,
}

async fn count<E>(db: &DatabaseConnection, select: sea_orm::Select<E>) -> Result<u64, ServiceError>
where
    E: EntityTrait,
    E::Model: sea_orm::FromQueryResult + Send + Sync,
{
    select.count(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// One round of counting per table; the dashboard refreshes rarely enough
/// that a batch of simple counts beats a hand-tuned query.
pub async fn overview(db: &DatabaseConnection) -> Result<Overview, ServiceError> {
    use models::*;

    let services_total = count(db, service::Entity::find()).await?;
    let services_active =
        count(db, service::Entity::find().filter(service::Column::Active.eq(true))).await?;
    let services_without_images =
        count(db, service::Entity::find().filter(service::Column::ImagePath.is_null())).await?;
    let formations_total = count(db, formation::Entity::find()).await?;
    let formations_active =
        count(db, formation::Entity::find().filter(formation::Column::Active.eq(true))).await?;
    let formations_without_images =
        count(db, formation::Entity::find().filter(formation::Column::ImagePath.is_null())).await?;
    let carousel_slides = count(db, carousel_image::Entity::find()).await?;
    let about_slides = count(db, about_image::Entity::find()).await?;
    let partners = count(db, partner::Entity::find()).await?;
    let brands = count(db, brand::Entity::find()).await?;
    let reviews = count(db, customer_review::Entity::find()).await?;
    let job_offers_active =
        count(db, job_offer::Entity::find().filter(job_offer::Column::Active.eq(true))).await?;
    let applications_pending = count(
        db,
        job_application::Entity::find()
            .filter(job_application::Column::Status.eq(job_application::Status::New.as_str())),
    )
    .await?;
    let spontaneous_pending = count(
        db,
        spontaneous_application::Entity::find().filter(
            spontaneous_application::Column::Status.eq(spontaneous_application::Status::New.as_str()),
        ),
    )
    .await?;
    let contacts_unprocessed =
        count(db, contact::Entity::find().filter(contact::Column::Processed.eq(false))).await?;
    let media_assets = count(db, media_asset::Entity::find()).await?;
    let mut media_by_kind = BTreeMap::new();
    for kind in media_asset::Kind::ALL {
        let n = count(
            db,
            media_asset::Entity::find()
                .filter(media_asset::Column::Kind.eq(kind.as_str()))
                .filter(media_asset::Column::Active.eq(true)),
        )
        .await?;
        media_by_kind.insert(kind.as_str().to_string(), n);
    }

    Ok(Overview {
        services_total,
        services_active,
        services_without_images,
        formations_total,
        formations_active,
        formations_without_images,
        carousel_slides,
        about_slides,
        partners,
        brands,
        reviews,
        job_offers_active,
        applications_pending,
        spontaneous_pending,
        contacts_unprocessed,
        media_assets,
        media_by_kind,
    })
}

/// Most recent admin actions, for the dashboard's activity widget.
pub async fn recent_activity(
    db: &DatabaseConnection,
    limit: u32,
) -> Result<Vec<models::activity::Model>, ServiceError> {
    crate::activity_service::list_entries(db, None, None, Pagination::first_page(limit)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn counters_track_inserts() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let before = overview(&db).await?;
        let svc = crate::catalog_service::create_service(
            &db,
            &format!("Counter {}", uuid::Uuid::new_v4()),
            models::service::Category::Development,
            "d",
            "s",
            "i",
        )
        .await?;
        let after = overview(&db).await?;
        assert_eq!(after.services_total, before.services_total + 1);
        assert_eq!(after.services_active, before.services_active + 1);
        // a fresh service has no image yet
        assert_eq!(after.services_without_images, before.services_without_images + 1);

        crate::catalog_service::delete_service(&db, svc.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn media_counters_group_by_kind() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let root = std::env::temp_dir().join(format!("overview_{}", uuid::Uuid::new_v4()));
        let store = crate::storage::MediaStore::new(root).await?;

        let before = overview(&db).await?;
        let asset = crate::media_service::upload(
            &db,
            &store,
            crate::media_service::UploadInput {
                file_name: "slide.png",
                bytes: b"png-bytes",
                name: None,
                kind: models::media_asset::Kind::Carousel,
                description: "",
                uploaded_by: None,
            },
        )
        .await?;
        let after = overview(&db).await?;
        assert_eq!(after.media_assets, before.media_assets + 1);
        assert_eq!(
            after.media_by_kind["carousel"],
            before.media_by_kind["carousel"] + 1,
        );
        // every kind tag is present even when its bucket is empty
        for kind in models::media_asset::Kind::ALL {
            assert!(after.media_by_kind.contains_key(kind.as_str()));
        }

        crate::media_service::delete(&db, &store, asset.id).await?;
        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }
}
