//! Partner logos shown on the public site.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::partner;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::storage::{self, MediaStore, LOGO_EXTENSIONS};

const LOGO_DIR: &str = "partners";

pub async fn create_partner(
    db: &DatabaseConnection,
    store: &MediaStore,
    name: &str,
    website_url: &str,
    description: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<partner::Model, ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("name required".into()));
    }
    partner::validate_website_url(website_url)?;
    if bytes.is_empty() {
        return Err(ServiceError::Validation("empty file".into()));
    }
    if !storage::has_allowed_extension(file_name, LOGO_EXTENSIONS) {
        return Err(ServiceError::Validation(format!("unsupported logo type: {file_name}")));
    }
    let rel = store.save(LOGO_DIR, file_name, bytes).await?;
    let now = Utc::now();
    let am = partner::ActiveModel {
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

pub async fn get_partner(db: &DatabaseConnection, id: Uuid) -> Result<Option<partner::Model>, ServiceError> {
    Ok(partner::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn list_partners_paginated(
    db: &DatabaseConnection,
    active: Option<bool>,
    opts: Pagination,
) -> Result<Vec<partner::Model>, ServiceError> {
    let (page_idx, per_page) = opts.window();
    let mut select = partner::Entity::find().order_by_asc(partner::Column::Position);
    if let Some(a) = active {
        select = select.filter(partner::Column::Active.eq(a));
    }
    let rows = select
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

pub async fn list_active_partners(db: &DatabaseConnection) -> Result<Vec<partner::Model>, ServiceError> {
    let rows = partner::Entity::find()
        .filter(partner::Column::Active.eq(true))
        .order_by_asc(partner::Column::Position)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

pub async fn update_partner(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    website_url: Option<&str>,
    description: Option<&str>,
    position: Option<i32>,
) -> Result<partner::Model, ServiceError> {
    let mut am: partner::ActiveModel = partner::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("partner"))?
        .into();
    if let Some(n) = name {
        if n.trim().is_empty() {
            return Err(ServiceError::Validation("name required".into()));
        }
        am.name = Set(n.trim().to_string());
    }
    if let Some(w) = website_url {
        partner::validate_website_url(w)?;
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

pub async fn toggle_partner(db: &DatabaseConnection, id: Uuid) -> Result<partner::Model, ServiceError> {
    let found = partner::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("partner"))?;
    let next = !found.active;
    let mut am: partner::ActiveModel = found.into();
    am.active = Set(next);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn delete_partner(db: &DatabaseConnection, store: &MediaStore, id: Uuid) -> Result<(), ServiceError> {
    let found = partner::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("partner"))?;
    partner::Entity::delete_by_id(id)
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
        let root = std::env::temp_dir().join(format!("partner_svc_{}", Uuid::new_v4()));
        MediaStore::new(root).await.expect("create store")
    }

    #[tokio::test]
    async fn partner_lifecycle_and_svg_logo() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;

        let p = create_partner(&db, &store, "Acme", "https://acme.example", "infra partner", "acme.svg", b"<svg/>").await?;
        assert!(p.logo_path.starts_with("partners/"));

        let err = create_partner(&db, &store, "NoScheme", "acme.example", "", "a.png", b"x").await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));

        let updated = update_partner(&db, p.id, None, Some("http://acme.example"), None, Some(1)).await?;
        assert_eq!(updated.website_url, "http://acme.example");

        toggle_partner(&db, p.id).await?;
        assert!(list_active_partners(&db).await?.iter().all(|x| x.id != p.id));

        delete_partner(&db, &store, p.id).await?;
        assert!(get_partner(&db, p.id).await?.is_none());

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }
}
