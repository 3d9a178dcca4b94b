//! CRUD over the services offered on the public site.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::service;

use crate::{errors::ServiceError, pagination::Pagination};

pub async fn create_service(
    db: &DatabaseConnection,
    title: &str,
    category: service::Category,
    description: &str,
    short_description: &str,
    icon: &str,
) -> Result<service::Model, ServiceError> {
    service::validate_title(title)?;
    let now = Utc::now();
    let am = service::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.trim().to_string()),
        category: Set(category.as_str().to_string()),
        description: Set(description.to_string()),
        short_description: Set(short_description.to_string()),
        icon: Set(icon.to_string()),
        image_path: Set(None),
        position: Set(0),
        active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    Ok(am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn get_service(db: &DatabaseConnection, id: Uuid) -> Result<Option<service::Model>, ServiceError> {
    Ok(service::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// Admin listing with optional category/active filters.
pub async fn list_services_paginated(
    db: &DatabaseConnection,
    category: Option<service::Category>,
    active: Option<bool>,
    opts: Pagination,
) -> Result<Vec<service::Model>, ServiceError> {
    let (page_idx, per_page) = opts.window();
    let mut select = service::Entity::find()
        .order_by_asc(service::Column::Position)
        .order_by_asc(service::Column::CreatedAt);
    if let Some(c) = category {
        select = select.filter(service::Column::Category.eq(c.as_str()));
    }
    if let Some(a) = active {
        select = select.filter(service::Column::Active.eq(a));
    }
    let rows = select
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Public listing: active services in display order.
pub async fn list_active_services(db: &DatabaseConnection) -> Result<Vec<service::Model>, ServiceError> {
    let rows = service::Entity::find()
        .filter(service::Column::Active.eq(true))
        .order_by_asc(service::Column::Position)
        .order_by_asc(service::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub async fn update_service(
    db: &DatabaseConnection,
    id: Uuid,
    title: Option<&str>,
    category: Option<service::Category>,
    description: Option<&str>,
    short_description: Option<&str>,
    icon: Option<&str>,
    position: Option<i32>,
) -> Result<service::Model, ServiceError> {
    let mut am: service::ActiveModel = service::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("service"))?
        .into();
    if let Some(t) = title {
        service::validate_title(t)?;
        am.title = Set(t.trim().to_string());
    }
    if let Some(c) = category {
        am.category = Set(c.as_str().to_string());
    }
    if let Some(d) = description {
        am.description = Set(d.to_string());
    }
    if let Some(s) = short_description {
        am.short_description = Set(s.to_string());
    }
    if let Some(i) = icon {
        am.icon = Set(i.to_string());
    }
    if let Some(p) = position {
        am.position = Set(p);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn toggle_service(db: &DatabaseConnection, id: Uuid) -> Result<service::Model, ServiceError> {
    let found = service::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("service"))?;
    let next = !found.active;
    let mut am: service::ActiveModel = found.into();
    am.active = Set(next);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// Delete a service. Contacts referencing it keep their row; the foreign key
/// is nulled out by the schema.
pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = service::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("service"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn service_crud_roundtrip() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let created = create_service(
            &db,
            &format!("Audit {}", Uuid::new_v4()),
            service::Category::Security,
            "full description",
            "short",
            "icon-shield",
        )
        .await?;
        assert!(created.active);
        assert_eq!(created.category, "security");

        let updated = update_service(&db, created.id, Some("Renamed"), Some(service::Category::Consulting), None, None, None, Some(3)).await?;
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.category, "consulting");
        assert_eq!(updated.position, 3);

        let toggled = toggle_service(&db, created.id).await?;
        assert!(!toggled.active);
        let actives = list_active_services(&db).await?;
        assert!(actives.iter().all(|s| s.id != created.id));

        delete_service(&db, created.id).await?;
        assert!(get_service(&db, created.id).await?.is_none());
        let err = delete_service(&db, created.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn empty_title_is_rejected() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let err = create_service(&db, "  ", service::Category::Support, "d", "s", "i").await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        Ok(())
    }
}
