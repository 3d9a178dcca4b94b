//! Admin CRUD for partners, brands and customer reviews. Creation is
//! multipart so the logo or photo arrives with the form.

use axum::{
    extract::{Multipart, Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::ApiMessage;
use models::activity::Action;
use service::review_service::{self, ReviewInput};
use service::{brand_service, partner_service};

use crate::errors::JsonApiError;
use crate::extract::FormData;
use crate::routes::auth::{Actor, ServerState};
use crate::routes::{log_action, pagination};

#[derive(Deserialize)]
pub struct ShowcaseQuery {
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

// --- partners ---

pub async fn list_partners(
    State(state): State<ServerState>,
    Query(q): Query<ShowcaseQuery>,
) -> Result<Json<Vec<models::partner::Model>>, JsonApiError> {
    let rows =
        partner_service::list_partners_paginated(&state.db, q.active, pagination(q.page, q.per_page)).await?;
    Ok(Json(rows))
}

pub async fn create_partner(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<Json<models::partner::Model>, JsonApiError> {
    let form = FormData::read(multipart).await?;
    let logo = form.require_file("logo")?;
    let created = partner_service::create_partner(
        &state.db,
        &state.store,
        form.require("name")?,
        form.require("website_url")?,
        form.text("description").unwrap_or(""),
        &logo.file_name,
        &logo.bytes,
    )
    .await?;
    log_action(&state, actor, Action::Create, "partner", &created.id.to_string(), &created.name).await;
    Ok(Json(created))
}

#[derive(Deserialize)]
pub struct PartnerPatch {
    pub name: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
}

pub async fn update_partner(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PartnerPatch>,
) -> Result<Json<models::partner::Model>, JsonApiError> {
    let updated = partner_service::update_partner(
        &state.db,
        id,
        patch.name.as_deref(),
        patch.website_url.as_deref(),
        patch.description.as_deref(),
        patch.position,
    )
    .await?;
    log_action(&state, actor, Action::Update, "partner", &id.to_string(), &updated.name).await;
    Ok(Json(updated))
}

pub async fn toggle_partner(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::partner::Model>, JsonApiError> {
    let toggled = partner_service::toggle_partner(&state.db, id).await?;
    let action = if toggled.active { Action::Activate } else { Action::Deactivate };
    log_action(&state, actor, action, "partner", &id.to_string(), &toggled.name).await;
    Ok(Json(toggled))
}

pub async fn delete_partner(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    partner_service::delete_partner(&state.db, &state.store, id).await?;
    log_action(&state, actor, Action::Delete, "partner", &id.to_string(), "deleted partner").await;
    Ok(Json(ApiMessage::ok("deleted")))
}

// --- brands ---

pub async fn list_brands(
    State(state): State<ServerState>,
    Query(q): Query<ShowcaseQuery>,
) -> Result<Json<Vec<models::brand::Model>>, JsonApiError> {
    let rows =
        brand_service::list_brands_paginated(&state.db, q.active, pagination(q.page, q.per_page)).await?;
    Ok(Json(rows))
}

pub async fn create_brand(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<Json<models::brand::Model>, JsonApiError> {
    let form = FormData::read(multipart).await?;
    let logo = form.require_file("logo")?;
    let created = brand_service::create_brand(
        &state.db,
        &state.store,
        form.require("name")?,
        form.text("website_url").unwrap_or(""),
        form.text("description").unwrap_or(""),
        &logo.file_name,
        &logo.bytes,
    )
    .await?;
    log_action(&state, actor, Action::Create, "brand", &created.id.to_string(), &created.name).await;
    Ok(Json(created))
}

#[derive(Deserialize)]
pub struct BrandPatch {
    pub name: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
}

pub async fn update_brand(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(patch): Json<BrandPatch>,
) -> Result<Json<models::brand::Model>, JsonApiError> {
    let updated = brand_service::update_brand(
        &state.db,
        id,
        patch.name.as_deref(),
        patch.website_url.as_deref(),
        patch.description.as_deref(),
        patch.position,
    )
    .await?;
    log_action(&state, actor, Action::Update, "brand", &id.to_string(), &updated.name).await;
    Ok(Json(updated))
}

pub async fn toggle_brand(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::brand::Model>, JsonApiError> {
    let toggled = brand_service::toggle_brand(&state.db, id).await?;
    let action = if toggled.active { Action::Activate } else { Action::Deactivate };
    log_action(&state, actor, action, "brand", &id.to_string(), &toggled.name).await;
    Ok(Json(toggled))
}

pub async fn delete_brand(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    brand_service::delete_brand(&state.db, &state.store, id).await?;
    log_action(&state, actor, Action::Delete, "brand", &id.to_string(), "deleted brand").await;
    Ok(Json(ApiMessage::ok("deleted")))
}

// --- reviews ---

#[derive(Deserialize)]
pub struct ReviewQuery {
    pub active: Option<bool>,
    pub min_rating: Option<i32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list_reviews(
    State(state): State<ServerState>,
    Query(q): Query<ReviewQuery>,
) -> Result<Json<Vec<models::customer_review::Model>>, JsonApiError> {
    let rows = review_service::list_reviews_paginated(
        &state.db,
        q.active,
        q.min_rating,
        pagination(q.page, q.per_page),
    )
    .await?;
    Ok(Json(rows))
}

pub async fn create_review(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<Json<models::customer_review::Model>, JsonApiError> {
    let form = FormData::read(multipart).await?;
    let rating: i32 = form
        .require("rating")?
        .parse()
        .map_err(|_| JsonApiError::bad_request("invalid rating"))?;
    let created = review_service::create_review(
        &state.db,
        &state.store,
        ReviewInput {
            name: form.require("name")?,
            company: form.text("company"),
            role: form.text("role"),
            comment: form.require("comment")?,
            rating,
            photo: form.file("photo").map(|f| (f.file_name.as_str(), f.bytes.as_slice())),
        },
    )
    .await?;
    log_action(&state, actor, Action::Create, "customer_review", &created.id.to_string(), &created.name).await;
    Ok(Json(created))
}

#[derive(Deserialize)]
pub struct ReviewPatch {
    pub name: Option<String>,
    /// Empty string clears the field.
    pub company: Option<String>,
    pub role: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<i32>,
    pub position: Option<i32>,
}

fn clearable(v: &Option<String>) -> Option<Option<&str>> {
    v.as_ref().map(|s| if s.is_empty() { None } else { Some(s.as_str()) })
}

pub async fn update_review(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ReviewPatch>,
) -> Result<Json<models::customer_review::Model>, JsonApiError> {
    let updated = review_service::update_review(
        &state.db,
        id,
        patch.name.as_deref(),
        clearable(&patch.company),
        clearable(&patch.role),
        patch.comment.as_deref(),
        patch.rating,
        patch.position,
    )
    .await?;
    log_action(&state, actor, Action::Update, "customer_review", &id.to_string(), &updated.name).await;
    Ok(Json(updated))
}

pub async fn toggle_review(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::customer_review::Model>, JsonApiError> {
    let toggled = review_service::toggle_review(&state.db, id).await?;
    let action = if toggled.active { Action::Activate } else { Action::Deactivate };
    log_action(&state, actor, action, "customer_review", &id.to_string(), &toggled.name).await;
    Ok(Json(toggled))
}

pub async fn delete_review(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    review_service::delete_review(&state.db, &state.store, id).await?;
    log_action(&state, actor, Action::Delete, "customer_review", &id.to_string(), "deleted review").await;
    Ok(Json(ApiMessage::ok("deleted")))
}
