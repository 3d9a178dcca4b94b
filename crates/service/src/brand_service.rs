//! Brands the company distributes or integrates. Managed like partners but
//! rendered in a separate strip on the site.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::brand;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::storage::{self, MediaStore, LOGO_EXTENSIONS};

const LOGO_DIR: &str = "brands";

pub async fn create_brand(
    db: &DatabaseConnection,
    store: &MediaStore,
    name: &str,
    website_url: &str,
    description: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<brand::Model, ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("name required".into()));
    }
    if bytes.is_empty() {
        return Err(ServiceError::Validation("empty file".into()));
    }
    if !storage::has_allowed_extension(file_name, LOGO_EXTENSIONS) {
        return Err(ServiceError::Validation(format!("unsupported logo type: {file_name}")));
    }
    let rel = store.save(LOGO_DIR, file_name, bytes).await?;
    let now = Utc::now();
    let am = brand::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        website_url: Set(website_url.to_string()),
        logo_path: Set(rel),
        description: Set(description.to_string()),
        position: Set(0),
        active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    Ok(am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn get_brand(db: &DatabaseConnection, id: Uuid) -> Result<Option<brand::Model>, ServiceError> {
    Ok(brand::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn list_brands_paginated(
    db: &DatabaseConnection,
    active: Option<bool>,
    opts: Pagination,
) -> Result<Vec<brand::Model>, ServiceError> {
    let (page_idx, per_page) = opts.window();
    let mut select = brand::Entity::find().order_by_asc(brand::Column::Position);
    if let Some(a) = active {
        select = select.filter(brand::Column::Active.eq(a));
    }
    let rows = select
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

pub async fn list_active_brands(db: &DatabaseConnection) -> Result<Vec<brand::Model>, ServiceError> {
    let rows = brand::Entity::find()
        .filter(brand::Column::Active.eq(true))
        .order_by_asc(brand::Column::Position)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

pub async fn update_brand(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    website_url: Option<&str>,
    description: Option<&str>,
    position: Option<i32>,
) -> Result<brand::Model, ServiceError> {
    let mut am: brand::ActiveModel = brand::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("brand"))?
        .into();
    if let Some(n) = name {
        if n.trim().is_empty() {
            return Err(ServiceError::Validation("name required".into()));
        }
        am.name = Set(n.trim().to_string());
    }
    if let Some(w) = website_url {
        am.website_url = Set(w.to_string());
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

pub async fn toggle_brand(db: &DatabaseConnection, id: Uuid) -> Result<brand::Model, ServiceError> {
    let found = brand::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("brand"))?;
    let next = !found.active;
    let mut am: brand::ActiveModel = found.into();
    am.active = Set(next);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn delete_brand(db: &DatabaseConnection, store: &MediaStore, id: Uuid) -> Result<(), ServiceError> {
    let found = brand::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("brand"))?;
    brand::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    store.delete(&found.logo_path).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use std::sync::Arc;

    async fn temp_store() -> Arc<MediaStore> {
        let root = std::env::temp_dir().join(format!("brand_svc_{}", Uuid::new_v4()));
        MediaStore::new(root).await.expect("create store")
    }

    #[tokio::test]
    async fn brand_lifecycle() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;

        let b = create_brand(&db, &store, "Vendor", "https://vendor.example", "", "vendor.png", b"png").await?;
        toggle_brand(&db, b.id).await?;
        assert!(list_active_brands(&db).await?.iter().all(|x| x.id != b.id));
        delete_brand(&db, &store, b.id).await?;
        assert!(get_brand(&db, b.id).await?.is_none());

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }
}
