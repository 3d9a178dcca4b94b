//! Admin endpoint driving the media sync utility.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use service::sync_service::{self, SyncTarget};

use crate::errors::JsonApiError;
use crate::routes::auth::{Actor, ServerState};

#[derive(Deserialize)]
pub struct SyncRequest {
    pub asset_id: Uuid,
    /// One of: service, formation, carousel, about, site_config.
    pub target_kind: String,
    pub target_id: Option<Uuid>,
    /// Required when `target_kind` is `site_config`: logo, hero_image or
    /// about_image.
    pub field: Option<String>,
}

#[derive(Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub path: String,
}

#[utoipa::path(post, path = "/admin/sync", tag = "media", request_body = crate::openapi::SyncRequestDoc, responses((status = 200, description = "Synced"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn sync(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<SyncRequest>,
) -> Result<Json<SyncResponse>, JsonApiError> {
    let target = SyncTarget::from_parts(&req.target_kind, req.target_id, req.field.as_deref())?;
    let path = sync_service::sync_media(&state.db, &state.store, req.asset_id, target).await?;
    let object_id = req
        .target_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| req.field.clone().unwrap_or_default());
    service::activity_service::record_best_effort(
        &state.db,
        actor.0,
        models::activity::Action::Update,
        req.target_kind.as_str(),
        &object_id,
        &format!("synced media into {}", path),
    )
    .await;
    Ok(Json(SyncResponse { success: true, path }))
}
