use crate::db::connect;
use crate::{admin_credentials, admin_user, media_asset, service};
use anyhow::Result;
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_admin_user_create_and_credentials_upsert() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = format!("admin_{}@example.com", Uuid::new_v4());
    let created = admin_user::create(&db, &email, "Admin").await?;
    assert_eq!(created.email, email);

    let found = admin_user::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());

    // Upsert twice; second call must update, not duplicate
    admin_credentials::upsert_password(&db, created.id, "hash-one".into(), "argon2").await?;
    let cred = admin_credentials::upsert_password(&db, created.id, "hash-two".into(), "argon2").await?;
    assert_eq!(cred.password_hash, "hash-two");

    admin_user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_admin_user_create_rejects_bad_input() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    assert!(admin_user::create(&db, "not-an-email", "X").await.is_err());
    assert!(admin_user::create(&db, "ok@example.com", "   ").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_service_entity_round_trip() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let now = Utc::now().into();
    let id = Uuid::new_v4();
    let am = service::ActiveModel {
        id: Set(id),
        title: Set("Cloud Migration".into()),
        category: Set("infrastructure".into()),
        description: Set("Full migration support".into()),
        short_description: Set("Move to the cloud".into()),
        icon: Set("fa-cloud".into()),
        image_path: Set(None),
        position: Set(1),
        active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(&db).await?;

    let found = service::Entity::find_by_id(id).one(&db).await?.expect("service exists");
    assert_eq!(found.title, "Cloud Migration");
    assert_eq!(found.category, "infrastructure");
    assert!(found.active);

    service::Entity::delete_by_id(id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_media_asset_fk_allows_missing_uploader() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let now = Utc::now().into();
    let id = Uuid::new_v4();
    let am = media_asset::ActiveModel {
        id: Set(id),
        name: Set("hero".into()),
        kind: Set("carousel".into()),
        file_path: Set("dashboard/hero.png".into()),
        description: Set(String::new()),
        active: Set(true),
        position: Set(0),
        uploaded_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(&db).await?;

    let found = media_asset::Entity::find_by_id(id).one(&db).await?.expect("asset exists");
    assert!(found.uploaded_by.is_none());

    media_asset::Entity::delete_by_id(id).exec(&db).await?;
    Ok(())
}
