//! Admin management of job offers and both kinds of applications.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use common::types::ApiMessage;
use models::activity::Action;
use service::recruitment_service::{self, OfferInput, OfferPatch};

use crate::errors::JsonApiError;
use crate::routes::auth::{Actor, ServerState};
use crate::routes::{log_action, pagination};

fn parse_contract(s: &str) -> Result<models::job_offer::ContractType, JsonApiError> {
    models::job_offer::ContractType::parse(s)
        .ok_or_else(|| JsonApiError::bad_request(format!("unknown contract type: {s}")))
}

fn parse_status(s: &str) -> Result<models::job_application::Status, JsonApiError> {
    models::job_application::Status::parse(s)
        .ok_or_else(|| JsonApiError::bad_request(format!("unknown application status: {s}")))
}

// --- offers ---

#[derive(Deserialize)]
pub struct OfferQuery {
    pub contract_type: Option<String>,
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list_offers(
    State(state): State<ServerState>,
    Query(q): Query<OfferQuery>,
) -> Result<Json<Vec<models::job_offer::Model>>, JsonApiError> {
    let contract = q.contract_type.as_deref().map(parse_contract).transpose()?;
    let rows = recruitment_service::list_offers_paginated(
        &state.db,
        contract,
        q.active,
        pagination(q.page, q.per_page),
    )
    .await?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct OfferCreate {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub missions: String,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub benefits: String,
    pub contract_type: String,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub min_experience: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub urgent: bool,
}

pub async fn create_offer(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<OfferCreate>,
) -> Result<Json<models::job_offer::Model>, JsonApiError> {
    let created = recruitment_service::create_offer(
        &state.db,
        OfferInput {
            title: &input.title,
            description: &input.description,
            missions: &input.missions,
            profile: &input.profile,
            benefits: &input.benefits,
            contract_type: parse_contract(&input.contract_type)?,
            location: &input.location,
            salary_min: input.salary_min,
            salary_max: input.salary_max,
            min_experience: input.min_experience.as_deref(),
            start_date: input.start_date,
            deadline: input.deadline,
            urgent: input.urgent,
        },
    )
    .await?;
    log_action(&state, actor, Action::Create, "job_offer", &created.id.to_string(), &created.title).await;
    Ok(Json(created))
}

#[derive(Deserialize)]
pub struct OfferPatchBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub missions: Option<String>,
    pub profile: Option<String>,
    pub benefits: Option<String>,
    pub contract_type: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub min_experience: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub urgent: Option<bool>,
    pub position: Option<i32>,
}

pub async fn update_offer(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(body): Json<OfferPatchBody>,
) -> Result<Json<models::job_offer::Model>, JsonApiError> {
    let patch = OfferPatch {
        title: body.title.as_deref(),
        description: body.description.as_deref(),
        missions: body.missions.as_deref(),
        profile: body.profile.as_deref(),
        benefits: body.benefits.as_deref(),
        contract_type: body.contract_type.as_deref().map(parse_contract).transpose()?,
        location: body.location.as_deref(),
        salary_min: body.salary_min.map(Some),
        salary_max: body.salary_max.map(Some),
        min_experience: body.min_experience.as_deref().map(Some),
        start_date: body.start_date.map(Some),
        deadline: body.deadline.map(Some),
        urgent: body.urgent,
        position: body.position,
    };
    let updated = recruitment_service::update_offer(&state.db, id, patch).await?;
    log_action(&state, actor, Action::Update, "job_offer", &id.to_string(), &updated.title).await;
    Ok(Json(updated))
}

pub async fn toggle_offer(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::job_offer::Model>, JsonApiError> {
    let toggled = recruitment_service::toggle_offer(&state.db, id).await?;
    let action = if toggled.active { Action::Activate } else { Action::Deactivate };
    log_action(&state, actor, action, "job_offer", &id.to_string(), &toggled.title).await;
    Ok(Json(toggled))
}

pub async fn delete_offer(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    recruitment_service::delete_offer(&state.db, id).await?;
    log_action(&state, actor, Action::Delete, "job_offer", &id.to_string(), "deleted offer").await;
    Ok(Json(ApiMessage::ok("deleted")))
}

// --- applications ---

#[derive(Deserialize)]
pub struct ApplicationQuery {
    pub offer_id: Option<Uuid>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list_applications(
    State(state): State<ServerState>,
    Query(q): Query<ApplicationQuery>,
) -> Result<Json<Vec<models::job_application::Model>>, JsonApiError> {
    let status = q.status.as_deref().map(parse_status).transpose()?;
    let rows = recruitment_service::list_applications_paginated(
        &state.db,
        q.offer_id,
        status,
        pagination(q.page, q.per_page),
    )
    .await?;
    Ok(Json(rows))
}

pub async fn get_application(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::job_application::Model>, JsonApiError> {
    recruitment_service::get_application(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("application not found"))
}

#[derive(Deserialize)]
pub struct StatusChange {
    pub status: String,
    pub notes: Option<String>,
}

pub async fn update_application(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusChange>,
) -> Result<Json<models::job_application::Model>, JsonApiError> {
    let status = parse_status(&body.status)?;
    let updated =
        recruitment_service::update_application_status(&state.db, id, status, body.notes.as_deref()).await?;
    log_action(
        &state,
        actor,
        Action::Update,
        "job_application",
        &id.to_string(),
        &format!("status -> {}", updated.status),
    )
    .await;
    Ok(Json(updated))
}

pub async fn delete_application(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    recruitment_service::delete_application(&state.db, &state.store, id).await?;
    log_action(&state, actor, Action::Delete, "job_application", &id.to_string(), "deleted application").await;
    Ok(Json(ApiMessage::ok("deleted")))
}

// --- unsolicited applications ---

#[derive(Deserialize)]
pub struct SpontaneousQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list_spontaneous(
    State(state): State<ServerState>,
    Query(q): Query<SpontaneousQuery>,
) -> Result<Json<Vec<models::spontaneous_application::Model>>, JsonApiError> {
    let status = q.status.as_deref().map(parse_status).transpose()?;
    let rows = recruitment_service::list_spontaneous_paginated(
        &state.db,
        status,
        pagination(q.page, q.per_page),
    )
    .await?;
    Ok(Json(rows))
}

pub async fn update_spontaneous(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusChange>,
) -> Result<Json<models::spontaneous_application::Model>, JsonApiError> {
    let status = parse_status(&body.status)?;
    let updated =
        recruitment_service::update_spontaneous_status(&state.db, id, status, body.notes.as_deref()).await?;
    log_action(
        &state,
        actor,
        Action::Update,
        "spontaneous_application",
        &id.to_string(),
        &format!("status -> {}", updated.status),
    )
    .await;
    Ok(Json(updated))
}

pub async fn delete_spontaneous(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, JsonApiError> {
    recruitment_service::delete_spontaneous(&state.db, &state.store, id).await?;
    log_action(&state, actor, Action::Delete, "spontaneous_application", &id.to_string(), "deleted application")
        .await;
    Ok(Json(ApiMessage::ok("deleted")))
}
