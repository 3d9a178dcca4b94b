//! Contact requests from the public site. A request may reference the
//! service or training it is about; those links are advisory and survive
//! as NULL when the referenced record goes away.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::contact;

use crate::{errors::ServiceError, pagination::Pagination};

pub struct ContactInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub subject: &'a str,
    pub message: &'a str,
    pub service_id: Option<Uuid>,
    pub formation_id: Option<Uuid>,
}

pub async fn submit_contact(db: &DatabaseConnection, input: ContactInput<'_>) -> Result<contact::Model, ServiceError> {
    contact::validate_required("name", input.name)?;
    contact::validate_email(input.email)?;
    contact::validate_required("subject", input.subject)?;
    contact::validate_required("message", input.message)?;

    if let Some(id) = input.service_id {
        models::service::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("service"))?;
    }
    if let Some(id) = input.formation_id {
        models::formation::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("formation"))?;
    }

    let am = contact::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        email: Set(input.email.trim().to_string()),
        phone: Set(input.phone.map(|p| p.to_string())),
        subject: Set(input.subject.trim().to_string()),
        message: Set(input.message.to_string()),
        service_id: Set(input.service_id),
        formation_id: Set(input.formation_id),
        processed: Set(false),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn get_contact(db: &DatabaseConnection, id: Uuid) -> Result<Option<contact::Model>, ServiceError> {
    Ok(contact::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// Admin listing, newest first, optionally by processed state.
pub async fn list_contacts_paginated(
    db: &DatabaseConnection,
    processed: Option<bool>,
    opts: Pagination,
) -> Result<Vec<contact::Model>, ServiceError> {
    let (page_idx, per_page) = opts.window();
    let mut select = contact::Entity::find().order_by_desc(contact::Column::CreatedAt);
    if let Some(p) = processed {
        select = select.filter(contact::Column::Processed.eq(p));
    }
    let rows = select
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Mark handled (or back to pending). Idempotent.
pub async fn set_processed(db: &DatabaseConnection, id: Uuid, processed: bool) -> Result<contact::Model, ServiceError> {
    let mut am: contact::ActiveModel = contact::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("contact"))?
        .into();
    am.processed = Set(processed);
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn delete_contact(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = contact::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("contact"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input<'a>() -> ContactInput<'a> {
        ContactInput {
            name: "Visitor",
            email: "visitor@example.com",
            phone: None,
            subject: "Quote",
            message: "Please call back",
            service_id: None,
            formation_id: None,
        }
    }

    #[tokio::test]
    async fn contact_lifecycle() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let c = submit_contact(&db, input()).await?;
        assert!(!c.processed);

        let done = set_processed(&db, c.id, true).await?;
        assert!(done.processed);
        // idempotent
        let still_done = set_processed(&db, c.id, true).await?;
        assert!(still_done.processed);

        delete_contact(&db, c.id).await?;
        assert!(get_contact(&db, c.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_service_reference_rejected() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let mut bad = input();
        bad.service_id = Some(Uuid::new_v4());
        let err = submit_contact(&db, bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn blank_fields_rejected() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let mut bad = input();
        bad.subject = "  ";
        let err = submit_contact(&db, bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        Ok(())
    }
}
