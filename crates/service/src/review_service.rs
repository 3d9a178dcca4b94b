//! Customer reviews curated by the admins. The optional photo follows the
//! same upload rules as other images.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::customer_review;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::storage::{self, MediaStore, IMAGE_EXTENSIONS};

const PHOTO_DIR: &str = "reviews";

pub struct ReviewInput<'a> {
    pub name: &'a str,
    pub company: Option<&'a str>,
    pub role: Option<&'a str>,
    pub comment: &'a str,
    pub rating: i32,
    /// Optional photo as (file name, bytes).
    pub photo: Option<(&'a str, &'a [u8])>,
}

pub async fn create_review(
    db: &DatabaseConnection,
    store: &MediaStore,
    input: ReviewInput<'_>,
) -> Result<customer_review::Model, ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("name required".into()));
    }
    if input.comment.trim().is_empty() {
        return Err(ServiceError::Validation("comment required".into()));
    }
    customer_review::validate_rating(input.rating)?;

    let photo_path = match input.photo {
        Some((file_name, bytes)) => {
            if !storage::has_allowed_extension(file_name, IMAGE_EXTENSIONS) {
                return Err(ServiceError::Validation(format!("unsupported photo type: {file_name}")));
            }
            Some(store.save(PHOTO_DIR, file_name, bytes).await?)
        }
        None => None,
    };

    let now = Utc::now();
    let am = customer_review::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        company: Set(input.company.map(|c| c.to_string())),
        role: Set(input.role.map(|r| r.to_string())),
        comment: Set(input.comment.to_string()),
        rating: Set(input.rating),
        photo_path: Set(photo_path),
        position: Set(0),
        active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    Ok(am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn get_review(db: &DatabaseConnection, id: Uuid) -> Result<Option<customer_review::Model>, ServiceError> {
    Ok(customer_review::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn list_reviews_paginated(
    db: &DatabaseConnection,
    active: Option<bool>,
    min_rating: Option<i32>,
    opts: Pagination,
) -> Result<Vec<customer_review::Model>, ServiceError> {
    let (page_idx, per_page) = opts.window();
    let mut select = customer_review::Entity::find().order_by_asc(customer_review::Column::Position);
    if let Some(a) = active {
        select = select.filter(customer_review::Column::Active.eq(a));
    }
    if let Some(r) = min_rating {
        select = select.filter(customer_review::Column::Rating.gte(r));
    }
    let rows = select
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

pub async fn list_active_reviews(db: &DatabaseConnection) -> Result<Vec<customer_review::Model>, ServiceError> {
    let rows = customer_review::Entity::find()
        .filter(customer_review::Column::Active.eq(true))
        .order_by_asc(customer_review::Column::Position)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub async fn update_review(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    company: Option<Option<&str>>,
    role: Option<Option<&str>>,
    comment: Option<&str>,
    rating: Option<i32>,
    position: Option<i32>,
) -> Result<customer_review::Model, ServiceError> {
    let mut am: customer_review::ActiveModel = customer_review::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("review"))?
        .into();
    if let Some(n) = name {
        if n.trim().is_empty() {
            return Err(ServiceError::Validation("name required".into()));
        }
        am.name = Set(n.trim().to_string());
    }
    if let Some(c) = company {
        am.company = Set(c.map(|s| s.to_string()));
    }
    if let Some(r) = role {
        am.role = Set(r.map(|s| s.to_string()));
    }
    if let Some(c) = comment {
        am.comment = Set(c.to_string());
    }
    if let Some(r) = rating {
        customer_review::validate_rating(r)?;
        am.rating = Set(r);
    }
    if let Some(p) = position {
        am.position = Set(p);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn toggle_review(db: &DatabaseConnection, id: Uuid) -> Result<customer_review::Model, ServiceError> {
    let found = customer_review::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("review"))?;
    let next = !found.active;
    let mut am: customer_review::ActiveModel = found.into();
    am.active = Set(next);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn delete_review(db: &DatabaseConnection, store: &MediaStore, id: Uuid) -> Result<(), ServiceError> {
    let found = customer_review::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("review"))?;
    customer_review::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if let Some(photo) = found.photo_path {
        store.delete(&photo).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use std::sync::Arc;

    async fn temp_store() -> Arc<MediaStore> {
        let root = std::env::temp_dir().join(format!("review_svc_{}", Uuid::new_v4()));
        MediaStore::new(root).await.expect("create store")
    }

    #[tokio::test]
    async fn review_lifecycle_and_rating_bounds() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;

        let input = ReviewInput {
            name: "Client A",
            company: Some("Acme"),
            role: None,
            comment: "great work",
            rating: 5,
            photo: None,
        };
        let review = create_review(&db, &store, input).await?;
        assert!(review.photo_path.is_none());

        let err = update_review(&db, review.id, None, None, None, None, Some(6), None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));

        let updated = update_review(&db, review.id, None, None, None, None, Some(3), None).await?;
        assert_eq!(updated.rating, 3);

        delete_review(&db, &store, review.id).await?;
        assert!(get_review(&db, review.id).await?.is_none());

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn zero_rating_rejected_on_create() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store().await;
        let input = ReviewInput { name: "X", company: None, role: None, comment: "c", rating: 0, photo: None };
        let err = create_review(&db, &store, input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }
}
