//! Slides for the "about us" section. Same shape as the carousel but kept
//! separate so the two galleries can evolve independently.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::about_image;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::storage::{self, MediaStore, IMAGE_EXTENSIONS};

const SLIDE_DIR: &str = "about";

pub async fn create_slide(
    db: &DatabaseConnection,
    store: &MediaStore,
    title: &str,
    description: Option<&str>,
    file_name: &str,
    bytes: &[u8],
) -> Result<about_image::Model, ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::Validation("title required".into()));
    }
    if bytes.is_empty() {
        return Err(ServiceError::Validation("empty file".into()));
    }
    if !storage::has_allowed_extension(file_name, IMAGE_EXTENSIONS) {
        return Err(ServiceError::Validation(format!("unsupported image type: {file_name}")));
    }
    let rel = store.save(SLIDE_DIR, file_name, bytes).await?;
    let now = Utc::now();
    let am = about_image::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.trim().to_string()),
        description: Set(description.map(|d| d.to_string())),
        image_path: Set(rel),
        position: Set(0),
        active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    Ok(am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn get_slide(db: &DatabaseConnection, id: Uuid) -> Result<Option<about_image::Model>, ServiceError> {
    Ok(about_image::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn list_slides_paginated(
    db: &DatabaseConnection,
    active: Option<bool>,
    opts: Pagination,
) -> Result<Vec<about_image::Model>, ServiceError> {
    let (page_idx, per_page) = opts.window();
    let mut select = about_image::Entity::find().order_by_asc(about_image::Column::Position);
    if let Some(a) = active {
        select = select.filter(about_image::Column::Active.eq(a));
    }
    let rows = select
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

pub async fn list_active_slides(db: &DatabaseConnection) -> Result<Vec<about_image::Model>, ServiceError> {
    let rows = about_image::Entity::find()
        .filter(about_image::Column::Active.eq(true))
        .order_by_asc(about_image::Column::Position)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

pub async fn update_slide(
    db: &DatabaseConnection,
    id: Uuid,
    title: Option<&str>,
    description: Option<Option<&str>>,
    position: Option<i32>,
) -> Result<about_image::Model, ServiceError> {
    let mut am: about_image::ActiveModel = about_image::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("about image"))?
        .into();
    if let Some(t) = title {
        if t.trim().is_empty() {
            return Err(ServiceError::Validation("title required".into()));
        }
        am.title = Set(t.trim().to_string());
    }
    if let Some(d) = description {
        am.description = Set(d.map(|s| s.to_string()));
    }
    if let Some(p) = position {
        am.position = Set(p);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn toggle_slide(db: &DatabaseConnection, id: Uuid) -> Result<about_image::Model, ServiceError> {
    let found = about_image::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("about image"))?;
    let next = !found.active;
    let mut am: about_image::ActiveModel = found.into();
    am.active = Set(next);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn delete_slide(db: &DatabaseConnection, store: &MediaStore, id: Uuid) -> Result<(), ServiceError> {
    let found = about_image::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("about image"))?;
    about_image::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    store.delete(&found.image_path).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use std::sync::Arc;

    async fn temp_store() -> Arc<MediaStore> {
        let root = std::env::temp_dir().join(format!("about_svc_{}", Uuid::new_v4()));
        MediaStore::new(root).await.expect("create store")
    }

    #[tokio::test]
    async fn about_slide_lifecycle() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;

        let slide = create_slide(&db, &store, "Our team", None, "team.webp", b"webp").await?;
        assert!(slide.image_path.starts_with("about/"));

        toggle_slide(&db, slide.id).await?;
        assert!(list_active_slides(&db).await?.iter().all(|s| s.id != slide.id));

        delete_slide(&db, &store, slide.id).await?;
        assert!(get_slide(&db, slide.id).await?.is_none());

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }
}
