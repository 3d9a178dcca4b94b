//! Append-only trail of admin actions. Entries are written after the fact
//! and never updated or deleted.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::warn;
use uuid::Uuid;

use models::activity;

use crate::{errors::ServiceError, pagination::Pagination};

/// Record one admin action. `object_id` is kept as text so the log can
/// reference both UUID-keyed rows and rows deleted since.
pub async fn record(
    db: &DatabaseConnection,
    actor_id: Uuid,
    action: activity::Action,
    object_type: &str,
    object_id: &str,
    description: &str,
) -> Result<activity::Model, ServiceError> {
    let am = activity::ActiveModel {
        actor_id: Set(actor_id),
        action: Set(action.as_str().to_string()),
        object_type: Set(object_type.to_string()),
        object_id: Set(object_id.to_string()),
        description: Set(description.to_string()),
        timestamp: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// Record an action without failing the surrounding operation. The mutation
/// the entry describes has already happened; losing the log line is the
/// lesser problem.
pub async fn record_best_effort(
    db: &DatabaseConnection,
    actor_id: Uuid,
    action: activity::Action,
    object_type: &str,
    object_id: &str,
    description: &str,
) {
    if let Err(e) = record(db, actor_id, action, object_type, object_id, description).await {
        warn!(object_type, object_id, error = %e, "activity entry dropped");
    }
}

/// List entries, most recent first, optionally filtered by action and/or
/// object type.
pub async fn list_entries(
    db: &DatabaseConnection,
    action: Option<activity::Action>,
    object_type: Option<&str>,
    opts: Pagination,
) -> Result<Vec<activity::Model>, ServiceError> {
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
    let (page_idx, per_page) = opts.window();
    let mut select = activity::Entity::find().order_by_desc(activity::Column::Timestamp);
    if let Some(a) = action {
        select = select.filter(activity::Column::Action.eq(a.as_str()));
    }
    if let Some(t) = object_type {
        select = select.filter(activity::Column::ObjectType.eq(t));
    }
    let rows = select
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    async fn seed_actor(db: &DatabaseConnection) -> Uuid {
        let email = format!("activity_{}@test.local", Uuid::new_v4());
        models::admin_user::create(db, &email, "Activity Tester")
            .await
            .expect("seed admin")
            .id
    }

    #[tokio::test]
    async fn records_and_filters_entries() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let actor = seed_actor(&db).await;

        let marker = Uuid::new_v4().to_string();
        record(&db, actor, activity::Action::Create, "test_object", &marker, "created it").await?;
        record(&db, actor, activity::Action::Delete, "test_object", &marker, "deleted it").await?;

        let all = list_entries(&db, None, Some("test_object"), Pagination::default()).await?;
        let mine: Vec<_> = all.iter().filter(|e| e.object_id == marker).collect();
        assert_eq!(mine.len(), 2);
        // most recent first
        assert_eq!(mine[0].action, "delete");

        let deletes =
            list_entries(&db, Some(activity::Action::Delete), Some("test_object"), Pagination::default()).await?;
        assert!(deletes.iter().all(|e| e.action == "delete"));
        Ok(())
    }

    #[tokio::test]
    async fn best_effort_never_panics() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        // unknown actor violates the FK; the failure is swallowed
        record_best_effort(&db, Uuid::new_v4(), activity::Action::Update, "ghost", "1", "no actor").await;
        Ok(())
    }
}
