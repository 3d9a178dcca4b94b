//! Media registry: every file uploaded through the dashboard gets a row
//! here, tagged with its intended use. Content records reference copies of
//! these files, not the registry rows, so deleting an asset never breaks
//! a published page.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::media_asset;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::storage::{self, MediaStore, IMAGE_EXTENSIONS};

/// Subdirectory where registry uploads land.
pub const UPLOAD_DIR: &str = "dashboard";

pub struct UploadInput<'a> {
    pub file_name: &'a str,
    pub bytes: &'a [u8],
    /// Display name; defaults to the file stem when absent.
    pub name: Option<&'a str>,
    pub kind: media_asset::Kind,
    pub description: &'a str,
    pub uploaded_by: Option<Uuid>,
}

/// Store an uploaded image and register it. Re-uploading the same file
/// yields a second, independent asset; the registry is deliberately not
/// deduplicated.
pub async fn upload(
    db: &DatabaseConnection,
    store: &MediaStore,
    input: UploadInput<'_>,
) -> Result<media_asset::Model, ServiceError> {
    if input.bytes.is_empty() {
        return Err(ServiceError::Validation("empty file".into()));
    }
    if !storage::has_allowed_extension(input.file_name, IMAGE_EXTENSIONS) {
        return Err(ServiceError::Validation(format!(
            "unsupported image type: {} (allowed: {})",
            input.file_name,
            IMAGE_EXTENSIONS.join(", ")
        )));
    }

    let rel = store.save(UPLOAD_DIR, input.file_name, input.bytes).await?;
    let name = match input.name {
        Some(n) if !n.trim().is_empty() => n.trim().to_string(),
        _ => storage::name_from_file(input.file_name),
    };

    let now = Utc::now();
    let am = media_asset::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        kind: Set(input.kind.as_str().to_string()),
        file_path: Set(rel),
        description: Set(input.description.to_string()),
        active: Set(true),
        position: Set(0),
        uploaded_by: Set(input.uploaded_by),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    Ok(am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<Option<media_asset::Model>, ServiceError> {
    Ok(media_asset::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// List assets, newest first, with optional kind/active/name filters.
/// `name_contains` is a case-insensitive substring match.
pub async fn list(
    db: &DatabaseConnection,
    kind: Option<media_asset::Kind>,
    active: Option<bool>,
    name_contains: Option<&str>,
    opts: Pagination,
) -> Result<Vec<media_asset::Model>, ServiceError> {
    let (page_idx, per_page) = opts.window();
    let mut select = media_asset::Entity::find().order_by_desc(media_asset::Column::CreatedAt);
    if let Some(k) = kind {
        select = select.filter(media_asset::Column::Kind.eq(k.as_str()));
    }
    if let Some(a) = active {
        select = select.filter(media_asset::Column::Active.eq(a));
    }
    if let Some(q) = name_contains {
        let q = q.trim();
        if !q.is_empty() {
            select = select.filter(media_asset::Column::Name.contains(q));
        }
    }
    let rows = select
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Update registry metadata. The stored file itself never changes.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    kind: Option<media_asset::Kind>,
    description: Option<&str>,
    position: Option<i32>,
) -> Result<media_asset::Model, ServiceError> {
    let mut am: media_asset::ActiveModel = media_asset::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("media asset"))?
        .into();
    if let Some(n) = name {
        if n.trim().is_empty() {
            return Err(ServiceError::Validation("name required".into()));
        }
        am.name = Set(n.trim().to_string());
    }
    if let Some(k) = kind {
        am.kind = Set(k.as_str().to_string());
    }
    if let Some(d) = description {
        am.description = Set(d.to_string());
    }
    if let Some(p) = position {
        am.position = Set(p);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// Flip the active flag; inactive assets are hidden from pickers but keep
/// their file.
pub async fn toggle_active(db: &DatabaseConnection, id: Uuid) -> Result<media_asset::Model, ServiceError> {
    let found = media_asset::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("media asset"))?;
    let next = !found.active;
    let mut am: media_asset::ActiveModel = found.into();
    am.active = Set(next);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// Delete the registry row and its stored file. The file removal is
/// best-effort; copies synced into content directories are untouched.
pub async fn delete(db: &DatabaseConnection, store: &MediaStore, id: Uuid) -> Result<(), ServiceError> {
    let found = media_asset::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("media asset"))?;
    media_asset::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    store.delete(&found.file_path).await;
    Ok(())
}

/// Assets whose stored file name is referenced by no content image field.
/// A registry file `dashboard/x_logo.png` counts as used when any synced
/// copy (`services/x_logo.png`, ...) shares its file name, since syncs keep
/// names. Linear scan; the registry is small.
pub async fn unused_assets(db: &DatabaseConnection) -> Result<Vec<media_asset::Model>, ServiceError> {
    use std::collections::HashSet;

    fn file_name_of(path: &str) -> Option<&str> {
        path.rsplit('/').next()
    }

    let mut referenced: HashSet<String> = HashSet::new();
    let mut keep = |p: &Option<String>| {
        if let Some(p) = p {
            if let Some(n) = file_name_of(p) {
                referenced.insert(n.to_string());
            }
        }
    };

    for s in models::service::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
    {
        keep(&s.image_path);
    }
    for f in models::formation::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
    {
        keep(&f.image_path);
    }
    for c in models::carousel_image::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
    {
        keep(&Some(c.image_path));
    }
    for a in models::about_image::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
    {
        keep(&Some(a.image_path));
    }
    for cfg in models::site_config::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
    {
        keep(&cfg.logo_path);
        keep(&cfg.hero_image_path);
        keep(&cfg.about_image_path);
    }

    let assets = media_asset::Entity::find()
        .order_by_desc(media_asset::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(assets
        .into_iter()
        .filter(|a| match file_name_of(&a.file_path) {
            Some(n) => !referenced.contains(n),
            None => true,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use std::sync::Arc;

    async fn temp_store() -> Arc<MediaStore> {
        let root = std::env::temp_dir().join(format!("media_svc_{}", Uuid::new_v4()));
        MediaStore::new(root).await.expect("create store")
    }

    fn png(name: &str) -> UploadInput<'_> {
        UploadInput {
            file_name: name,
            bytes: b"png-bytes",
            name: None,
            kind: media_asset::Kind::Other,
            description: "",
            uploaded_by: None,
        }
    }

    #[tokio::test]
    async fn upload_registers_and_names_from_file() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;

        let asset = upload(&db, &store, png("team-photo.png")).await?;
        assert_eq!(asset.name, "team-photo");
        assert!(asset.active);
        assert!(store.exists(&asset.file_path).await);

        // same file again -> second independent asset
        let twin = upload(&db, &store, png("team-photo.png")).await?;
        assert_ne!(twin.id, asset.id);
        assert_ne!(twin.file_path, asset.file_path);

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn upload_rejects_bad_extension_and_empty_body() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;

        let err = upload(&db, &store, png("script.exe")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let mut empty = png("ok.png");
        empty.bytes = b"";
        let err = upload(&db, &store, empty).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn toggle_and_delete() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;

        let asset = upload(&db, &store, png("toggle-me.png")).await?;
        let toggled = toggle_active(&db, asset.id).await?;
        assert!(!toggled.active);
        let back = toggle_active(&db, asset.id).await?;
        assert!(back.active);

        delete(&db, &store, asset.id).await?;
        assert!(get(&db, asset.id).await?.is_none());
        assert!(!store.exists(&asset.file_path).await);

        let err = delete(&db, &store, asset.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_kind_and_name() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;

        let marker = Uuid::new_v4().simple().to_string();
        let mut input = png("banner.png");
        input.name = Some(&marker);
        input.kind = media_asset::Kind::Carousel;
        upload(&db, &store, input).await?;

        let found = list(&db, Some(media_asset::Kind::Carousel), Some(true), Some(&marker), Pagination::default()).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, marker);

        let none = list(&db, Some(media_asset::Kind::About), None, Some(&marker), Pagination::default()).await?;
        assert!(none.is_empty());

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }
}
