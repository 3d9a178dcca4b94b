//! Minimal OpenAPI surface for the dashboard developers. Only the
//! endpoints with non-obvious payloads are documented; the rest follow
//! the same CRUD shape.

use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /admin/sync`: copy a registered media file into a
/// content record's image field.
#[derive(Deserialize, ToSchema)]
pub struct SyncRequestDoc {
    pub asset_id: uuid::Uuid,
    /// One of `service`, `formation`, `carousel`, `about`, `site_config`.
    pub target_kind: String,
    /// Required for every kind except `site_config`.
    pub target_id: Option<uuid::Uuid>,
    /// Site config image field: `logo`, `hero_image` or `about_image`.
    pub field: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::media::list,
        crate::routes::media::upload,
        crate::routes::sync::sync,
        crate::routes::content::create_service,
    ),
    components(schemas(RegisterRequest, LoginRequest, SyncRequestDoc)),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "auth", description = "Admin authentication"),
        (name = "media", description = "Media registry and sync"),
        (name = "content", description = "Site content management"),
    )
)]
pub struct ApiDoc;
