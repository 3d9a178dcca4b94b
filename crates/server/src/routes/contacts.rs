//! Admin view over contact requests.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::ApiMessage;
use models::activity::Action;
use service::contact_service;

use crate::errors::JsonApiError;
use crate::routes::auth::{Actor, ServerState};
use crate::routes::{log_action, pagination};

#[derive(Deserialize)]
pub struct ContactQuery {
    pub processed: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ContactQuery>,
) -> Result<Json<Vec<models::contact::Model>>, JsonApiError> {
    let rows =
        contact_service::list_contacts_paginated(&state.db, q.processed, pagination(q.page, q.per_page))
            .await?;
    Ok(Json(rows))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::contact::Model>, JsonApiError> {
    contact_service::get_contact(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("contact not found"))
}

#[derive(Deserialize)]
pub struct ProcessedChange {
    pub processed: bool,
}

pub async fn set_processed(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(body): Json<ProcessedChange>,
) -> Result<Json<models::contact::Model>, JsonApiError> {
    let updated = contact_service::set_processed(&state.db, id, body.processed).await?;
    let desc = if updated.processed { "marked processed" } else { "reopened" };
    log_action(&state, actor, Action::Update, "contact", &id.to_string(), desc).await;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    contact_service::delete_contact(&state.db, id).await?;
    log_action(&state, actor, Action::Delete, "contact", &id.to_string(), "deleted contact").await;
    Ok(Json(ApiMessage::ok("deleted")))
}
