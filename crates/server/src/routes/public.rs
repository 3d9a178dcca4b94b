//! Unauthenticated JSON API consumed by the public site.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use service::contact_service::{self, ContactInput};
use service::recruitment_service::{self, ApplicationInput};
use service::{about_service, brand_service, carousel_service, catalog_service, formation_service,
    partner_service, review_service, site_config_service};

use crate::errors::JsonApiError;
use crate::extract::FormData;
use crate::routes::auth::ServerState;

/// Everything the landing page needs in one request.
#[derive(Serialize)]
pub struct HomePayload {
    pub config: models::site_config::Model,
    pub carousel: Vec<models::carousel_image::Model>,
    pub services: Vec<models::service::Model>,
    pub formations: Vec<models::formation::Model>,
    pub about_slides: Vec<models::about_image::Model>,
    pub partners: Vec<models::partner::Model>,
    pub brands: Vec<models::brand::Model>,
    pub reviews: Vec<models::customer_review::Model>,
}

pub async fn home(State(state): State<ServerState>) -> Result<Json<HomePayload>, JsonApiError> {
    let db = &state.db;
    Ok(Json(HomePayload {
        config: site_config_service::get_or_create(db).await?,
        carousel: carousel_service::list_active_slides(db).await?,
        services: catalog_service::list_active_services(db).await?,
        formations: formation_service::list_active_formations(db).await?,
        about_slides: about_service::list_active_slides(db).await?,
        partners: partner_service::list_active_partners(db).await?,
        brands: brand_service::list_active_brands(db).await?,
        reviews: review_service::list_active_reviews(db).await?,
    }))
}

pub async fn list_services(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::service::Model>>, JsonApiError> {
    Ok(Json(catalog_service::list_active_services(&state.db).await?))
}

pub async fn get_service(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::service::Model>, JsonApiError> {
    catalog_service::get_service(&state.db, id)
        .await?
        .filter(|s| s.active)
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("service not found"))
}

pub async fn list_formations(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::formation::Model>>, JsonApiError> {
    Ok(Json(formation_service::list_active_formations(&state.db).await?))
}

pub async fn get_formation(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::formation::Model>, JsonApiError> {
    formation_service::get_formation(&state.db, id)
        .await?
        .filter(|f| f.active)
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("formation not found"))
}

/// The about page: slide gallery plus customer reviews.
#[derive(Serialize)]
pub struct AboutPayload {
    pub slides: Vec<models::about_image::Model>,
    pub reviews: Vec<models::customer_review::Model>,
}

pub async fn about(State(state): State<ServerState>) -> Result<Json<AboutPayload>, JsonApiError> {
    Ok(Json(AboutPayload {
        slides: about_service::list_active_slides(&state.db).await?,
        reviews: review_service::list_active_reviews(&state.db).await?,
    }))
}

pub async fn list_partners(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::partner::Model>>, JsonApiError> {
    Ok(Json(partner_service::list_active_partners(&state.db).await?))
}

pub async fn list_brands(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::brand::Model>>, JsonApiError> {
    Ok(Json(brand_service::list_active_brands(&state.db).await?))
}

/// A job offer plus the expiry flag the front end renders.
#[derive(Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub offer: models::job_offer::Model,
    pub expired: bool,
}

impl From<models::job_offer::Model> for JobView {
    fn from(offer: models::job_offer::Model) -> Self {
        let expired = offer.is_expired();
        Self { offer, expired }
    }
}

pub async fn list_jobs(State(state): State<ServerState>) -> Result<Json<Vec<JobView>>, JsonApiError> {
    let offers = recruitment_service::list_active_offers(&state.db).await?;
    Ok(Json(offers.into_iter().map(JobView::from).collect()))
}

pub async fn get_job(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobView>, JsonApiError> {
    let offer = recruitment_service::get_offer(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("job offer not found"))?;
    Ok(Json(JobView::from(offer)))
}

pub async fn get_config(
    State(state): State<ServerState>,
) -> Result<Json<models::site_config::Model>, JsonApiError> {
    Ok(Json(site_config_service::get_or_create(&state.db).await?))
}

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub service_id: Option<Uuid>,
    pub formation_id: Option<Uuid>,
}

pub async fn submit_contact(
    State(state): State<ServerState>,
    Json(input): Json<ContactRequest>,
) -> Result<Json<common::types::ApiMessage>, JsonApiError> {
    contact_service::submit_contact(
        &state.db,
        ContactInput {
            name: &input.name,
            email: &input.email,
            phone: input.phone.as_deref(),
            subject: &input.subject,
            message: &input.message,
            service_id: input.service_id,
            formation_id: input.formation_id,
        },
    )
    .await?;
    Ok(Json(common::types::ApiMessage::ok("message received")))
}

fn application_input<'a>(form: &'a FormData) -> Result<ApplicationInput<'a>, JsonApiError> {
    let resume = form.require_file("resume")?;
    Ok(ApplicationInput {
        first_name: form.require("first_name")?,
        last_name: form.require("last_name")?,
        email: form.require("email")?,
        phone: form.text("phone"),
        address: form.text("address"),
        cover_letter: form.text("cover_letter").unwrap_or(""),
        resume_file_name: &resume.file_name,
        resume_bytes: &resume.bytes,
    })
}

pub async fn apply_to_job(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<common::types::ApiMessage>, JsonApiError> {
    let form = FormData::read(multipart).await?;
    let input = application_input(&form)?;
    recruitment_service::submit_application(&state.db, &state.store, id, input).await?;
    Ok(Json(common::types::ApiMessage::ok("application received")))
}

pub async fn apply_spontaneous(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> Result<Json<common::types::ApiMessage>, JsonApiError> {
    let form = FormData::read(multipart).await?;
    let input = application_input(&form)?;
    recruitment_service::submit_spontaneous(&state.db, &state.store, input).await?;
    Ok(Json(common::types::ApiMessage::ok("application received")))
}
