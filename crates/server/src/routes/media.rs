//! Admin endpoints for the media registry.

use axum::{
    extract::{Multipart, Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use service::media_service::{self, UploadInput};

use crate::errors::JsonApiError;
use crate::extract::FormData;
use crate::routes::auth::{Actor, ServerState};
use crate::routes::pagination;

#[derive(Deserialize)]
pub struct MediaQuery {
    pub kind: Option<String>,
    pub active: Option<bool>,
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

fn parse_kind(s: &str) -> Result<models::media_asset::Kind, JsonApiError> {
    models::media_asset::Kind::parse(s)
        .ok_or_else(|| JsonApiError::bad_request(format!("unknown media kind: {s}")))
}

#[utoipa::path(get, path = "/admin/media", tag = "media", responses((status = 200, description = "Asset list")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<MediaQuery>,
) -> Result<Json<Vec<models::media_asset::Model>>, JsonApiError> {
    let kind = q.kind.as_deref().map(parse_kind).transpose()?;
    let rows = media_service::list(
        &state.db,
        kind,
        q.active,
        q.q.as_deref(),
        pagination(q.page, q.per_page),
    )
    .await?;
    Ok(Json(rows))
}

#[utoipa::path(post, path = "/admin/media", tag = "media", responses((status = 200, description = "Uploaded"), (status = 400, description = "Bad Request")))]
pub async fn upload(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<Json<models::media_asset::Model>, JsonApiError> {
    let form = FormData::read(multipart).await?;
    let file = form.require_file("file")?;
    let kind = parse_kind(form.text("kind").unwrap_or("other"))?;
    let asset = media_service::upload(
        &state.db,
        &state.store,
        UploadInput {
            file_name: &file.file_name,
            bytes: &file.bytes,
            name: form.text("name"),
            kind,
            description: form.text("description").unwrap_or(""),
            uploaded_by: Some(actor.0),
        },
    )
    .await?;
    service::activity_service::record_best_effort(
        &state.db,
        actor.0,
        models::activity::Action::Upload,
        "media_asset",
        &asset.id.to_string(),
        &format!("uploaded {}", asset.name),
    )
    .await;
    Ok(Json(asset))
}

#[derive(Deserialize)]
pub struct MediaPatch {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(patch): Json<MediaPatch>,
) -> Result<Json<models::media_asset::Model>, JsonApiError> {
    let kind = patch.kind.as_deref().map(parse_kind).transpose()?;
    let asset = media_service::update(
        &state.db,
        id,
        patch.name.as_deref(),
        kind,
        patch.description.as_deref(),
        patch.position,
    )
    .await?;
    service::activity_service::record_best_effort(
        &state.db,
        actor.0,
        models::activity::Action::Update,
        "media_asset",
        &id.to_string(),
        &format!("updated {}", asset.name),
    )
    .await;
    Ok(Json(asset))
}

pub async fn toggle(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::media_asset::Model>, JsonApiError> {
    let asset = media_service::toggle_active(&state.db, id).await?;
    let action = if asset.active {
        models::activity::Action::Activate
    } else {
        models::activity::Action::Deactivate
    };
    service::activity_service::record_best_effort(
        &state.db,
        actor.0,
        action,
        "media_asset",
        &id.to_string(),
        &asset.name,
    )
    .await;
    Ok(Json(asset))
}

pub async fn delete(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<common::types::ApiMessage>, JsonApiError> {
    media_service::delete(&state.db, &state.store, id).await?;
    service::activity_service::record_best_effort(
        &state.db,
        actor.0,
        models::activity::Action::Delete,
        "media_asset",
        &id.to_string(),
        "deleted media asset",
    )
    .await;
    Ok(Json(common::types::ApiMessage::ok("deleted")))
}

/// Registry rows no content record points at.
pub async fn unused(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::media_asset::Model>>, JsonApiError> {
    Ok(Json(media_service::unused_assets(&state.db).await?))
}
