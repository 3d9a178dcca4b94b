//! CRUD over the training catalog.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::formation;

use crate::{errors::ServiceError, pagination::Pagination};

pub struct FormationInput<'a> {
    pub title: &'a str,
    pub category: formation::Category,
    pub level: formation::Level,
    pub description: &'a str,
    pub objectives: &'a str,
    pub program: &'a str,
    pub duration: &'a str,
    pub price: f64,
}

pub async fn create_formation(
    db: &DatabaseConnection,
    input: FormationInput<'_>,
) -> Result<formation::Model, ServiceError> {
    formation::validate_title(input.title)?;
    if input.price < 0.0 {
        return Err(ServiceError::Validation("price must not be negative".into()));
    }
    let now = Utc::now();
    let am = formation::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title.trim().to_string()),
        category: Set(input.category.as_str().to_string()),
        level: Set(input.level.as_str().to_string()),
        description: Set(input.description.to_string()),
        objectives: Set(input.objectives.to_string()),
        program: Set(input.program.to_string()),
        duration: Set(input.duration.to_string()),
        price: Set(input.price),
        image_path: Set(None),
        active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    Ok(am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn get_formation(db: &DatabaseConnection, id: Uuid) -> Result<Option<formation::Model>, ServiceError> {
    Ok(formation::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn list_formations_paginated(
    db: &DatabaseConnection,
    category: Option<formation::Category>,
    level: Option<formation::Level>,
    active: Option<bool>,
    opts: Pagination,
) -> Result<Vec<formation::Model>, ServiceError> {
    let (page_idx, per_page) = opts.window();
    let mut select = formation::Entity::find().order_by_asc(formation::Column::Title);
    if let Some(c) = category {
        select = select.filter(formation::Column::Category.eq(c.as_str()));
    }
    if let Some(l) = level {
        select = select.filter(formation::Column::Level.eq(l.as_str()));
    }
    if let Some(a) = active {
        select = select.filter(formation::Column::Active.eq(a));
    }
    let rows = select
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Public listing: active trainings, alphabetical.
pub async fn list_active_formations(db: &DatabaseConnection) -> Result<Vec<formation::Model>, ServiceError> {
    let rows = formation::Entity::find()
        .filter(formation::Column::Active.eq(true))
        .order_by_asc(formation::Column::Title)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

pub struct FormationPatch<'a> {
    pub title: Option<&'a str>,
    pub category: Option<formation::Category>,
    pub level: Option<formation::Level>,
    pub description: Option<&'a str>,
    pub objectives: Option<&'a str>,
    pub program: Option<&'a str>,
    pub duration: Option<&'a str>,
    pub price: Option<f64>,
}

impl Default for FormationPatch<'_> {
    fn default() -> Self {
        Self {
            title: None,
            category: None,
            level: None,
            description: None,
            objectives: None,
            program: None,
            duration: None,
            price: None,
        }
    }
}

pub async fn update_formation(
    db: &DatabaseConnection,
    id: Uuid,
    patch: FormationPatch<'_>,
) -> Result<formation::Model, ServiceError> {
    let mut am: formation::ActiveModel = formation::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("formation"))?
        .into();
    if let Some(t) = patch.title {
        formation::validate_title(t)?;
        am.title = Set(t.trim().to_string());
    }
    if let Some(c) = patch.category {
        am.category = Set(c.as_str().to_string());
    }
    if let Some(l) = patch.level {
        am.level = Set(l.as_str().to_string());
    }
    if let Some(d) = patch.description {
        am.description = Set(d.to_string());
    }
    if let Some(o) = patch.objectives {
        am.objectives = Set(o.to_string());
    }
    if let Some(p) = patch.program {
        am.program = Set(p.to_string());
    }
    if let Some(d) = patch.duration {
        am.duration = Set(d.to_string());
    }
    if let Some(p) = patch.price {
        if p < 0.0 {
            return Err(ServiceError::Validation("price must not be negative".into()));
        }
        am.price = Set(p);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn toggle_formation(db: &DatabaseConnection, id: Uuid) -> Result<formation::Model, ServiceError> {
    let found = formation::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("formation"))?;
    let next = !found.active;
    let mut am: formation::ActiveModel = found.into();
    am.active = Set(next);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn delete_formation(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = formation::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("formation"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn sample_input(title: &str) -> FormationInput<'_> {
        FormationInput {
            title,
            category: formation::Category::Cloud,
            level: formation::Level::Beginner,
            description: "intro",
            objectives: "learn basics",
            program: "day 1: ...",
            duration: "3 days",
            price: 1200.0,
        }
    }

    #[tokio::test]
    async fn formation_crud_roundtrip() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let title = format!("Cloud 101 {}", Uuid::new_v4());
        let created = create_formation(&db, sample_input(&title)).await?;
        assert_eq!(created.level, "beginner");
        assert_eq!(created.price, 1200.0);

        let updated = update_formation(
            &db,
            created.id,
            FormationPatch { level: Some(formation::Level::Advanced), price: Some(1500.0), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.level, "advanced");
        assert_eq!(updated.price, 1500.0);

        toggle_formation(&db, created.id).await?;
        let actives = list_active_formations(&db).await?;
        assert!(actives.iter().all(|f| f.id != created.id));

        delete_formation(&db, created.id).await?;
        assert!(get_formation(&db, created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn negative_price_is_rejected() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let mut input = sample_input("Bad price");
        input.price = -1.0;
        let err = create_formation(&db, input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}
