//! Site-wide configuration: branding, hero and about copy, contact
//! details, social links, SEO metadata. Exactly one row is active at a
//! time; activating one clears the flag on every other row inside the
//! same transaction.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait};
use uuid::Uuid;

use models::site_config;

use crate::errors::ServiceError;

/// The configuration the public site renders: the active row, falling back
/// to the most recent one, created with defaults when the table is empty.
pub async fn get_or_create(db: &DatabaseConnection) -> Result<site_config::Model, ServiceError> {
    if let Some(active) = site_config::Entity::find()
        .filter(site_config::Column::Active.eq(true))
        .order_by_desc(site_config::Column::UpdatedAt)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
    {
        return Ok(active);
    }
    if let Some(latest) = site_config::Entity::find()
        .order_by_desc(site_config::Column::UpdatedAt)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
    {
        return Ok(latest);
    }

    let now = Utc::now();
    let am = site_config::ActiveModel {
        id: Set(Uuid::new_v4()),
        site_name: Set("My Site".to_string()),
        logo_path: Set(None),
        hero_title: Set(String::new()),
        hero_subtitle: Set(String::new()),
        hero_image_path: Set(None),
        about_title: Set(String::new()),
        about_description: Set(String::new()),
        about_image_path: Set(None),
        phone: Set(String::new()),
        email: Set("contact@example.com".to_string()),
        address: Set(String::new()),
        facebook_url: Set(None),
        twitter_url: Set(None),
        linkedin_url: Set(None),
        instagram_url: Set(None),
        meta_title: Set(String::new()),
        meta_description: Set(String::new()),
        active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    Ok(am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<Option<site_config::Model>, ServiceError> {
    Ok(site_config::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<site_config::Model>, ServiceError> {
    Ok(site_config::Entity::find()
        .order_by_desc(site_config::Column::UpdatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?)
}

#[derive(Default)]
pub struct ConfigPatch<'a> {
    pub site_name: Option<&'a str>,
    pub hero_title: Option<&'a str>,
    pub hero_subtitle: Option<&'a str>,
    pub about_title: Option<&'a str>,
    pub about_description: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
    pub facebook_url: Option<Option<&'a str>>,
    pub twitter_url: Option<Option<&'a str>>,
    pub linkedin_url: Option<Option<&'a str>>,
    pub instagram_url: Option<Option<&'a str>>,
    pub meta_title: Option<&'a str>,
    pub meta_description: Option<&'a str>,
}

/// Update text fields on a configuration row. Image fields change only
/// through the sync utility.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    patch: ConfigPatch<'_>,
) -> Result<site_config::Model, ServiceError> {
    let mut am: site_config::ActiveModel = site_config::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("site configuration"))?
        .into();
    if let Some(s) = patch.site_name {
        if s.trim().is_empty() {
            return Err(ServiceError::Validation("site_name required".into()));
        }
        am.site_name = Set(s.trim().to_string());
    }
    if let Some(v) = patch.hero_title {
        am.hero_title = Set(v.to_string());
    }
    if let Some(v) = patch.hero_subtitle {
        am.hero_subtitle = Set(v.to_string());
    }
    if let Some(v) = patch.about_title {
        am.about_title = Set(v.to_string());
    }
    if let Some(v) = patch.about_description {
        am.about_description = Set(v.to_string());
    }
    if let Some(v) = patch.phone {
        am.phone = Set(v.to_string());
    }
    if let Some(v) = patch.email {
        site_config::validate_email(v)?;
        am.email = Set(v.trim().to_string());
    }
    if let Some(v) = patch.address {
        am.address = Set(v.to_string());
    }
    if let Some(v) = patch.facebook_url {
        am.facebook_url = Set(v.map(|s| s.to_string()));
    }
    if let Some(v) = patch.twitter_url {
        am.twitter_url = Set(v.map(|s| s.to_string()));
    }
    if let Some(v) = patch.linkedin_url {
        am.linkedin_url = Set(v.map(|s| s.to_string()));
    }
    if let Some(v) = patch.instagram_url {
        am.instagram_url = Set(v.map(|s| s.to_string()));
    }
    if let Some(v) = patch.meta_title {
        am.meta_title = Set(v.to_string());
    }
    if let Some(v) = patch.meta_description {
        am.meta_description = Set(v.to_string());
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// Make one row the live configuration. The row is activated and all the
/// others deactivated in a single transaction, so readers never see zero
/// or two active rows.
pub async fn activate(db: &DatabaseConnection, id: Uuid) -> Result<site_config::Model, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    let mut am: site_config::ActiveModel = site_config::Entity::find_by_id(id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("site configuration"))?
        .into();
    am.active = Set(true);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&txn).await.map_err(|e| ServiceError::Db(e.to_string()))?;

    site_config::Entity::update_many()
        .col_expr(site_config::Column::Active, sea_orm::sea_query::Expr::value(false))
        .filter(site_config::Column::Id.ne(id))
        .filter(site_config::Column::Active.eq(true))
        .exec(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn get_or_create_bootstraps_once() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let first = get_or_create(&db).await?;
        let second = get_or_create(&db).await?;
        assert_eq!(first.id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn activate_keeps_exactly_one_active() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let base = get_or_create(&db).await?;
        // a second, inactive row
        let now = Utc::now();
        let other = site_config::ActiveModel {
            id: Set(Uuid::new_v4()),
            site_name: Set("Draft".to_string()),
            logo_path: Set(None),
            hero_title: Set(String::new()),
            hero_subtitle: Set(String::new()),
            hero_image_path: Set(None),
            about_title: Set(String::new()),
            about_description: Set(String::new()),
            about_image_path: Set(None),
            phone: Set(String::new()),
            email: Set("draft@example.com".to_string()),
            address: Set(String::new()),
            facebook_url: Set(None),
            twitter_url: Set(None),
            linkedin_url: Set(None),
            instagram_url: Set(None),
            meta_title: Set(String::new()),
            meta_description: Set(String::new()),
            active: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&db)
        .await?;

        let activated = activate(&db, other.id).await?;
        assert!(activated.active);

        let actives = site_config::Entity::find()
            .filter(site_config::Column::Active.eq(true))
            .all(&db)
            .await?;
        assert_eq!(actives.len(), 1);
        assert_eq!(actives[0].id, other.id);

        // restore the original for other tests
        activate(&db, base.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_validates_email_and_site_name() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let cfg = get_or_create(&db).await?;

        let err = update(&db, cfg.id, ConfigPatch { email: Some("nope"), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));

        let err = update(&db, cfg.id, ConfigPatch { site_name: Some("  "), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let updated = update(
            &db,
            cfg.id,
            ConfigPatch {
                hero_title: Some("Welcome"),
                linkedin_url: Some(Some("https://linkedin.com/company/x")),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.hero_title, "Welcome");
        assert!(updated.linkedin_url.is_some());
        Ok(())
    }
}
