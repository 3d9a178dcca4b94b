//! Site configuration, activity log and the dashboard overview.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use models::activity::Action;
use service::site_config_service::{self, ConfigPatch};
use service::{activity_service, overview_service};

use crate::errors::JsonApiError;
use crate::routes::auth::{Actor, ServerState};
use crate::routes::{log_action, pagination};

pub async fn get_config(
    State(state): State<ServerState>,
) -> Result<Json<models::site_config::Model>, JsonApiError> {
    Ok(Json(site_config_service::get_or_create(&state.db).await?))
}

pub async fn list_configs(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::site_config::Model>>, JsonApiError> {
    Ok(Json(site_config_service::list(&state.db).await?))
}

#[derive(Deserialize)]
pub struct ConfigUpdate {
    pub site_name: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub about_title: Option<String>,
    pub about_description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Empty string clears a social link.
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

fn clearable(v: &Option<String>) -> Option<Option<&str>> {
    v.as_ref().map(|s| if s.is_empty() { None } else { Some(s.as_str()) })
}

pub async fn update_config(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(body): Json<ConfigUpdate>,
) -> Result<Json<models::site_config::Model>, JsonApiError> {
    let patch = ConfigPatch {
        site_name: body.site_name.as_deref(),
        hero_title: body.hero_title.as_deref(),
        hero_subtitle: body.hero_subtitle.as_deref(),
        about_title: body.about_title.as_deref(),
        about_description: body.about_description.as_deref(),
        phone: body.phone.as_deref(),
        email: body.email.as_deref(),
        address: body.address.as_deref(),
        facebook_url: clearable(&body.facebook_url),
        twitter_url: clearable(&body.twitter_url),
        linkedin_url: clearable(&body.linkedin_url),
        instagram_url: clearable(&body.instagram_url),
        meta_title: body.meta_title.as_deref(),
        meta_description: body.meta_description.as_deref(),
    };
    let updated = site_config_service::update(&state.db, id, patch).await?;
    log_action(&state, actor, Action::Update, "site_config", &id.to_string(), &updated.site_name).await;
    Ok(Json(updated))
}

pub async fn activate_config(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::site_config::Model>, JsonApiError> {
    let activated = site_config_service::activate(&state.db, id).await?;
    log_action(&state, actor, Action::Activate, "site_config", &id.to_string(), &activated.site_name).await;
    Ok(Json(activated))
}

// --- activity log ---

#[derive(Deserialize)]
pub struct ActivityQuery {
    pub action: Option<String>,
    pub object_type: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list_activity(
    State(state): State<ServerState>,
    Query(q): Query<ActivityQuery>,
) -> Result<Json<Vec<models::activity::Model>>, JsonApiError> {
    let action = match q.action.as_deref() {
        None => None,
        Some(s) => Some(
            models::activity::Action::parse(s)
                .ok_or_else(|| JsonApiError::bad_request(format!("unknown action: {s}")))?,
        ),
    };
    let rows = activity_service::list_entries(
        &state.db,
        action,
        q.object_type.as_deref(),
        pagination(q.page, q.per_page),
    )
    .await?;
    Ok(Json(rows))
}

// --- overview ---

pub async fn overview(
    State(state): State<ServerState>,
) -> Result<Json<overview_service::Overview>, JsonApiError> {
    Ok(Json(overview_service::overview(&state.db).await?))
}

pub async fn recent_activity(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::activity::Model>>, JsonApiError> {
    Ok(Json(overview_service::recent_activity(&state.db, 10).await?))
}
