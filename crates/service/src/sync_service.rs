//! Copies a registry file into a content record's image slot.
//!
//! The copy is physical: the target directory gets its own file, named like
//! the source, and the record stores the copied path. Deleting the registry
//! asset afterwards does not disturb the content. The copy and the database
//! update are two steps with no rollback; if the update fails the copied
//! file simply stays on disk.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use models::site_config;

use crate::errors::ServiceError;
use crate::storage::MediaStore;

/// Closed set of destinations a registry file can be synced into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncTarget {
    Service(Uuid),
    Formation(Uuid),
    Carousel(Uuid),
    About(Uuid),
    SiteConfig(site_config::ImageField),
}

impl SyncTarget {
    /// Build a target from the wire form: a kind tag plus either a record id
    /// or, for the site configuration, an image field name. Unknown kinds
    /// and missing parts are rejected up front.
    pub fn from_parts(kind: &str, id: Option<Uuid>, field: Option<&str>) -> Result<Self, ServiceError> {
        let need_id = |id: Option<Uuid>| {
            id.ok_or_else(|| ServiceError::Validation(format!("sync target '{kind}' requires an id")))
        };
        match kind {
            "service" => Ok(SyncTarget::Service(need_id(id)?)),
            "formation" => Ok(SyncTarget::Formation(need_id(id)?)),
            "carousel" => Ok(SyncTarget::Carousel(need_id(id)?)),
            "about" => Ok(SyncTarget::About(need_id(id)?)),
            "site_config" => {
                let f = field
                    .ok_or_else(|| ServiceError::Validation("site_config sync requires a field".into()))?;
                let f = site_config::ImageField::parse(f)
                    .ok_or_else(|| ServiceError::Validation(format!("unknown config image field: {f}")))?;
                Ok(SyncTarget::SiteConfig(f))
            }
            other => Err(ServiceError::Validation(format!("unknown sync target: {other}"))),
        }
    }

    /// Directory the copy lands in, per destination kind.
    pub fn dest_dir(&self) -> &'static str {
        match self {
            SyncTarget::Service(_) => "services",
            SyncTarget::Formation(_) => "formations",
            SyncTarget::Carousel(_) => "carousel",
            SyncTarget::About(_) => "about",
            SyncTarget::SiteConfig(_) => "config",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SyncTarget::Service(_) => "service",
            SyncTarget::Formation(_) => "formation",
            SyncTarget::Carousel(_) => "carousel",
            SyncTarget::About(_) => "about",
            SyncTarget::SiteConfig(_) => "site_config",
        }
    }
}

/// Destination record, loaded up front so both ends are known good before
/// the copy happens.
enum Dest {
    Service(models::service::Model),
    Formation(models::formation::Model),
    Carousel(models::carousel_image::Model),
    About(models::about_image::Model),
    SiteConfig(models::site_config::Model, site_config::ImageField),
}

/// Copy the asset's file into the target's directory and point the target's
/// image field at the copy. Returns the stored relative path.
///
/// Two concurrent syncs into the same slot race benignly: both copies land
/// on disk and the last database write wins.
#[instrument(skip(db, store), fields(asset_id = %asset_id))]
pub async fn sync_media(
    db: &DatabaseConnection,
    store: &MediaStore,
    asset_id: Uuid,
    target: SyncTarget,
) -> Result<String, ServiceError> {
    let asset = models::media_asset::Entity::find_by_id(asset_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("media asset"))?;

    // Resolve the destination record before touching the filesystem so a
    // stale or mistyped id cannot leave a stray copy behind.
    let dest = match target {
        SyncTarget::Service(id) => Dest::Service(
            models::service::Entity::find_by_id(id)
                .one(db)
                .await
                .map_err(|e| ServiceError::Db(e.to_string()))?
                .ok_or_else(|| ServiceError::not_found("service"))?,
        ),
        SyncTarget::Formation(id) => Dest::Formation(
            models::formation::Entity::find_by_id(id)
                .one(db)
                .await
                .map_err(|e| ServiceError::Db(e.to_string()))?
                .ok_or_else(|| ServiceError::not_found("formation"))?,
        ),
        SyncTarget::Carousel(id) => Dest::Carousel(
            models::carousel_image::Entity::find_by_id(id)
                .one(db)
                .await
                .map_err(|e| ServiceError::Db(e.to_string()))?
                .ok_or_else(|| ServiceError::not_found("carousel image"))?,
        ),
        SyncTarget::About(id) => Dest::About(
            models::about_image::Entity::find_by_id(id)
                .one(db)
                .await
                .map_err(|e| ServiceError::Db(e.to_string()))?
                .ok_or_else(|| ServiceError::not_found("about image"))?,
        ),
        SyncTarget::SiteConfig(field) => {
            Dest::SiteConfig(crate::site_config_service::get_or_create(db).await?, field)
        }
    };

    let copied = store.copy_into(&asset.file_path, target.dest_dir()).await?;

    let now = Utc::now();
    match dest {
        Dest::Service(m) => {
            let mut am: models::service::ActiveModel = m.into();
            am.image_path = Set(Some(copied.clone()));
            am.updated_at = Set(now.into());
            am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        }
        Dest::Formation(m) => {
            let mut am: models::formation::ActiveModel = m.into();
            am.image_path = Set(Some(copied.clone()));
            am.updated_at = Set(now.into());
            am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        }
        Dest::Carousel(m) => {
            let mut am: models::carousel_image::ActiveModel = m.into();
            am.image_path = Set(copied.clone());
            am.updated_at = Set(now.into());
            am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        }
        Dest::About(m) => {
            let mut am: models::about_image::ActiveModel = m.into();
            am.image_path = Set(copied.clone());
            am.updated_at = Set(now.into());
            am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        }
        Dest::SiteConfig(cfg, field) => {
            let mut am: models::site_config::ActiveModel = cfg.into();
            match field {
                site_config::ImageField::Logo => am.logo_path = Set(Some(copied.clone())),
                site_config::ImageField::Hero => am.hero_image_path = Set(Some(copied.clone())),
                site_config::ImageField::About => am.about_image_path = Set(Some(copied.clone())),
            }
            am.updated_at = Set(now.into());
            am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        }
    }

    info!(target = target.kind(), path = %copied, "media synced");
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media_service::{self, UploadInput};
    use crate::test_support::get_db;
    use std::sync::Arc;

    #[test]
    fn from_parts_rejects_unknown_kind() {
        let err = SyncTarget::from_parts("banner", Some(Uuid::new_v4()), None).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn from_parts_requires_id_or_field() {
        assert!(SyncTarget::from_parts("service", None, None).is_err());
        assert!(SyncTarget::from_parts("site_config", None, None).is_err());
        assert!(SyncTarget::from_parts("site_config", None, Some("favicon")).is_err());

        let t = SyncTarget::from_parts("site_config", None, Some("hero_image")).unwrap();
        assert_eq!(t, SyncTarget::SiteConfig(site_config::ImageField::Hero));
        assert_eq!(t.dest_dir(), "config");
    }

    async fn temp_store() -> Arc<MediaStore> {
        let root = std::env::temp_dir().join(format!("sync_svc_{}", Uuid::new_v4()));
        MediaStore::new(root).await.expect("create store")
    }

    async fn seed_asset(db: &DatabaseConnection, store: &MediaStore) -> models::media_asset::Model {
        media_service::upload(
            db,
            store,
            UploadInput {
                file_name: "sync-me.png",
                bytes: b"png-bytes",
                name: None,
                kind: models::media_asset::Kind::Other,
                description: "",
                uploaded_by: None,
            },
        )
        .await
        .expect("seed asset")
    }

    #[tokio::test]
    async fn sync_into_service_copies_file_and_updates_record() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;
        let asset = seed_asset(&db, &store).await;

        let svc = crate::catalog_service::create_service(
            &db,
            "Sync target",
            models::service::Category::Development,
            "desc",
            "short",
            "icon-dev",
        )
        .await?;

        let path = sync_media(&db, &store, asset.id, SyncTarget::Service(svc.id)).await?;
        assert!(path.starts_with("services/"));
        assert!(store.exists(&path).await);
        // source file stays where it was
        assert!(store.exists(&asset.file_path).await);

        let reloaded = crate::catalog_service::get_service(&db, svc.id).await?.unwrap();
        assert_eq!(reloaded.image_path.as_deref(), Some(path.as_str()));

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn sync_into_config_field() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;
        let asset = seed_asset(&db, &store).await;

        let path = sync_media(
            &db,
            &store,
            asset.id,
            SyncTarget::SiteConfig(site_config::ImageField::Hero),
        )
        .await?;
        assert!(path.starts_with("config/"));

        let cfg = crate::site_config_service::get_or_create(&db).await?;
        assert_eq!(cfg.hero_image_path.as_deref(), Some(path.as_str()));

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_source_file_leaves_record_untouched() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;
        let asset = seed_asset(&db, &store).await;
        // lose the file behind the registry's back
        tokio::fs::remove_file(store.abs(&asset.file_path)).await?;

        let svc = crate::catalog_service::create_service(
            &db,
            "Unchanged",
            models::service::Category::Support,
            "desc",
            "short",
            "icon-sup",
        )
        .await?;

        let err = sync_media(&db, &store, asset.id, SyncTarget::Service(svc.id)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Io(_)));

        let reloaded = crate::catalog_service::get_service(&db, svc.id).await?.unwrap();
        assert!(reloaded.image_path.is_none());
        // the failed copy must not have created the destination directory
        assert!(tokio::fs::metadata(store.abs("services")).await.is_err());

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_target_record_leaves_no_copy() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;
        let asset = seed_asset(&db, &store).await;

        let err = sync_media(&db, &store, asset.id, SyncTarget::Service(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        // nothing was written under the destination kind's directory
        assert!(tokio::fs::metadata(store.abs("services")).await.is_err());
        // and the registry file is untouched
        assert!(store.exists(&asset.file_path).await);

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_asset_is_not_found() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;
        let err = sync_media(&db, &store, Uuid::new_v4(), SyncTarget::SiteConfig(site_config::ImageField::Logo))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }
}
