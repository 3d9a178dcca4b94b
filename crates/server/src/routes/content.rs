//! Admin CRUD for site content: services, trainings, and the two slide
//! galleries. Slide creation is multipart (the image arrives with the
//! form); the rest is plain JSON.

use axum::{
    extract::{Multipart, Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::ApiMessage;
use models::activity::Action;
use service::formation_service::{self, FormationInput, FormationPatch};
use service::{about_service, carousel_service, catalog_service};

use crate::errors::JsonApiError;
use crate::extract::FormData;
use crate::routes::auth::{Actor, ServerState};
use crate::routes::{log_action, pagination};

fn parse_service_category(s: &str) -> Result<models::service::Category, JsonApiError> {
    models::service::Category::parse(s)
        .ok_or_else(|| JsonApiError::bad_request(format!("unknown service category: {s}")))
}

fn parse_formation_category(s: &str) -> Result<models::formation::Category, JsonApiError> {
    models::formation::Category::parse(s)
        .ok_or_else(|| JsonApiError::bad_request(format!("unknown formation category: {s}")))
}

fn parse_formation_level(s: &str) -> Result<models::formation::Level, JsonApiError> {
    models::formation::Level::parse(s)
        .ok_or_else(|| JsonApiError::bad_request(format!("unknown formation level: {s}")))
}

// --- services ---

#[derive(Deserialize)]
pub struct ServiceQuery {
    pub category: Option<String>,
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list_services(
    State(state): State<ServerState>,
    Query(q): Query<ServiceQuery>,
) -> Result<Json<Vec<models::service::Model>>, JsonApiError> {
    let category = q.category.as_deref().map(parse_service_category).transpose()?;
    let rows = catalog_service::list_services_paginated(
        &state.db,
        category,
        q.active,
        pagination(q.page, q.per_page),
    )
    .await?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct ServiceCreate {
    pub title: String,
    pub category: String,
    pub description: String,
    pub short_description: String,
    pub icon: String,
}

#[utoipa::path(post, path = "/admin/services", tag = "content", responses((status = 200, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create_service(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<ServiceCreate>,
) -> Result<Json<models::service::Model>, JsonApiError> {
    let category = parse_service_category(&input.category)?;
    let created = catalog_service::create_service(
        &state.db,
        &input.title,
        category,
        &input.description,
        &input.short_description,
        &input.icon,
    )
    .await?;
    log_action(&state, actor, Action::Create, "service", &created.id.to_string(), &created.title).await;
    Ok(Json(created))
}

#[derive(Deserialize)]
pub struct ServicePatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub icon: Option<String>,
    pub position: Option<i32>,
}

pub async fn update_service(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ServicePatch>,
) -> Result<Json<models::service::Model>, JsonApiError> {
    let category = patch.category.as_deref().map(parse_service_category).transpose()?;
    let updated = catalog_service::update_service(
        &state.db,
        id,
        patch.title.as_deref(),
        category,
        patch.description.as_deref(),
        patch.short_description.as_deref(),
        patch.icon.as_deref(),
        patch.position,
    )
    .await?;
    log_action(&state, actor, Action::Update, "service", &id.to_string(), &updated.title).await;
    Ok(Json(updated))
}

pub async fn toggle_service(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::service::Model>, JsonApiError> {
    let toggled = catalog_service::toggle_service(&state.db, id).await?;
    let action = if toggled.active { Action::Activate } else { Action::Deactivate };
    log_action(&state, actor, action, "service", &id.to_string(), &toggled.title).await;
    Ok(Json(toggled))
}

pub async fn delete_service(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    catalog_service::delete_service(&state.db, id).await?;
    log_action(&state, actor, Action::Delete, "service", &id.to_string(), "deleted service").await;
    Ok(Json(ApiMessage::ok("deleted")))
}

// --- formations ---

#[derive(Deserialize)]
pub struct FormationQuery {
    pub category: Option<String>,
    pub level: Option<String>,
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list_formations(
    State(state): State<ServerState>,
    Query(q): Query<FormationQuery>,
) -> Result<Json<Vec<models::formation::Model>>, JsonApiError> {
    let category = q.category.as_deref().map(parse_formation_category).transpose()?;
    let level = q.level.as_deref().map(parse_formation_level).transpose()?;
    let rows = formation_service::list_formations_paginated(
        &state.db,
        category,
        level,
        q.active,
        pagination(q.page, q.per_page),
    )
    .await?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct FormationCreate {
    pub title: String,
    pub category: String,
    pub level: String,
    pub description: String,
    pub objectives: String,
    pub program: String,
    pub duration: String,
    pub price: f64,
}

pub async fn create_formation(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<FormationCreate>,
) -> Result<Json<models::formation::Model>, JsonApiError> {
    let created = formation_service::create_formation(
        &state.db,
        FormationInput {
            title: &input.title,
            category: parse_formation_category(&input.category)?,
            level: parse_formation_level(&input.level)?,
            description: &input.description,
            objectives: &input.objectives,
            program: &input.program,
            duration: &input.duration,
            price: input.price,
        },
    )
    .await?;
    log_action(&state, actor, Action::Create, "formation", &created.id.to_string(), &created.title).await;
    Ok(Json(created))
}

#[derive(Deserialize)]
pub struct FormationPatchBody {
    pub title: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub objectives: Option<String>,
    pub program: Option<String>,
    pub duration: Option<String>,
    pub price: Option<f64>,
}

pub async fn update_formation(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(body): Json<FormationPatchBody>,
) -> Result<Json<models::formation::Model>, JsonApiError> {
    let patch = FormationPatch {
        title: body.title.as_deref(),
        category: body.category.as_deref().map(parse_formation_category).transpose()?,
        level: body.level.as_deref().map(parse_formation_level).transpose()?,
        description: body.description.as_deref(),
        objectives: body.objectives.as_deref(),
        program: body.program.as_deref(),
        duration: body.duration.as_deref(),
        price: body.price,
    };
    let updated = formation_service::update_formation(&state.db, id, patch).await?;
    log_action(&state, actor, Action::Update, "formation", &id.to_string(), &updated.title).await;
    Ok(Json(updated))
}

pub async fn toggle_formation(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::formation::Model>, JsonApiError> {
    let toggled = formation_service::toggle_formation(&state.db, id).await?;
    let action = if toggled.active { Action::Activate } else { Action::Deactivate };
    log_action(&state, actor, action, "formation", &id.to_string(), &toggled.title).await;
    Ok(Json(toggled))
}

pub async fn delete_formation(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    formation_service::delete_formation(&state.db, id).await?;
    log_action(&state, actor, Action::Delete, "formation", &id.to_string(), "deleted formation").await;
    Ok(Json(ApiMessage::ok("deleted")))
}

// --- slides (carousel + about) ---

#[derive(Deserialize)]
pub struct SlideQuery {
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Deserialize)]
pub struct SlidePatch {
    pub title: Option<String>,
    /// Empty string clears the description.
    pub description: Option<String>,
    pub position: Option<i32>,
}

fn description_patch(v: &Option<String>) -> Option<Option<&str>> {
    v.as_ref().map(|s| if s.is_empty() { None } else { Some(s.as_str()) })
}

pub async fn list_carousel(
    State(state): State<ServerState>,
    Query(q): Query<SlideQuery>,
) -> Result<Json<Vec<models::carousel_image::Model>>, JsonApiError> {
    let rows =
        carousel_service::list_slides_paginated(&state.db, q.active, pagination(q.page, q.per_page)).await?;
    Ok(Json(rows))
}

pub async fn create_carousel(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<Json<models::carousel_image::Model>, JsonApiError> {
    let form = FormData::read(multipart).await?;
    let file = form.require_file("image")?;
    let created = carousel_service::create_slide(
        &state.db,
        &state.store,
        form.require("title")?,
        form.text("description"),
        &file.file_name,
        &file.bytes,
    )
    .await?;
    log_action(&state, actor, Action::Create, "carousel_image", &created.id.to_string(), &created.title).await;
    Ok(Json(created))
}

pub async fn update_carousel(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(patch): Json<SlidePatch>,
) -> Result<Json<models::carousel_image::Model>, JsonApiError> {
    let updated = carousel_service::update_slide(
        &state.db,
        id,
        patch.title.as_deref(),
        description_patch(&patch.description),
        patch.position,
    )
    .await?;
    log_action(&state, actor, Action::Update, "carousel_image", &id.to_string(), &updated.title).await;
    Ok(Json(updated))
}

pub async fn toggle_carousel(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::carousel_image::Model>, JsonApiError> {
    let toggled = carousel_service::toggle_slide(&state.db, id).await?;
    let action = if toggled.active { Action::Activate } else { Action::Deactivate };
    log_action(&state, actor, action, "carousel_image", &id.to_string(), &toggled.title).await;
    Ok(Json(toggled))
}

pub async fn delete_carousel(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    carousel_service::delete_slide(&state.db, &state.store, id).await?;
    log_action(&state, actor, Action::Delete, "carousel_image", &id.to_string(), "deleted slide").await;
    Ok(Json(ApiMessage::ok("deleted")))
}

pub async fn list_about(
    State(state): State<ServerState>,
    Query(q): Query<SlideQuery>,
) -> Result<Json<Vec<models::about_image::Model>>, JsonApiError> {
    let rows =
        about_service::list_slides_paginated(&state.db, q.active, pagination(q.page, q.per_page)).await?;
    Ok(Json(rows))
}

pub async fn create_about(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<Json<models::about_image::Model>, JsonApiError> {
    let form = FormData::read(multipart).await?;
    let file = form.require_file("image")?;
    let created = about_service::create_slide(
        &state.db,
        &state.store,
        form.require("title")?,
        form.text("description"),
        &file.file_name,
        &file.bytes,
    )
    .await?;
    log_action(&state, actor, Action::Create, "about_image", &created.id.to_string(), &created.title).await;
    Ok(Json(created))
}

pub async fn update_about(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(patch): Json<SlidePatch>,
) -> Result<Json<models::about_image::Model>, JsonApiError> {
    let updated = about_service::update_slide(
        &state.db,
        id,
        patch.title.as_deref(),
        description_patch(&patch.description),
        patch.position,
    )
    .await?;
    log_action(&state, actor, Action::Update, "about_image", &id.to_string(), &updated.title).await;
    Ok(Json(updated))
}

pub async fn toggle_about(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::about_image::Model>, JsonApiError> {
    let toggled = about_service::toggle_slide(&state.db, id).await?;
    let action = if toggled.active { Action::Activate } else { Action::Deactivate };
    log_action(&state, actor, action, "about_image", &id.to_string(), &toggled.title).await;
    Ok(Json(toggled))
}

pub async fn delete_about(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    about_service::delete_slide(&state.db, &state.store, id).await?;
    log_action(&state, actor, Action::Delete, "about_image", &id.to_string(), "deleted slide").await;
    Ok(Json(ApiMessage::ok("deleted")))
}
