use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::pagination::Pagination;

pub mod auth;
pub mod contacts;
pub mod content;
pub mod media;
pub mod public;
pub mod recruitment;
pub mod settings;
pub mod showcase;
pub mod sync;

use auth::{Actor, ServerState};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service healthy")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Shared helper turning query params into service pagination.
pub(crate) fn pagination(page: Option<u32>, per_page: Option<u32>) -> Pagination {
    let d = Pagination::default();
    Pagination { page: page.unwrap_or(d.page), per_page: per_page.unwrap_or(d.per_page) }
}

/// Write an activity entry for an admin mutation; never fails the request.
pub(crate) async fn log_action(
    state: &ServerState,
    actor: Actor,
    action: models::activity::Action,
    object_type: &str,
    object_id: &str,
    description: &str,
) {
    service::activity_service::record_best_effort(
        &state.db,
        actor.0,
        action,
        object_type,
        object_id,
        description,
    )
    .await;
}

/// Build the full application router: static front end, public JSON API,
/// auth endpoints and the JWT-guarded admin tree.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let static_dir = ServeDir::new("frontend").fallback(ServeFile::new("frontend/index.html"));
    // uploaded files are served as-is under /media
    let media_dir = ServeDir::new(state.store.root().to_path_buf());

    let public = Router::new()
        .route("/health", get(health))
        .route("/api/home", get(public::home))
        .route("/api/services", get(public::list_services))
        .route("/api/services/:id", get(public::get_service))
        .route("/api/formations", get(public::list_formations))
        .route("/api/formations/:id", get(public::get_formation))
        .route("/api/about", get(public::about))
        .route("/api/partners", get(public::list_partners))
        .route("/api/brands", get(public::list_brands))
        .route("/api/jobs", get(public::list_jobs))
        .route("/api/jobs/:id", get(public::get_job))
        .route("/api/config", get(public::get_config))
        .route("/api/contact", post(public::submit_contact))
        .route("/api/jobs/:id/apply", post(public::apply_to_job))
        .route("/api/applications", post(public::apply_spontaneous));

    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me));

    let admin = Router::new()
        .route("/admin/overview", get(settings::overview))
        .route("/admin/overview/activity", get(settings::recent_activity))
        .route("/admin/activity", get(settings::list_activity))
        .route("/admin/media", get(media::list).post(media::upload))
        .route("/admin/media/unused", get(media::unused))
        .route("/admin/media/:id", put(media::update).delete(media::delete))
        .route("/admin/media/:id/toggle", post(media::toggle))
        .route("/admin/sync", post(sync::sync))
        .route("/admin/services", get(content::list_services).post(content::create_service))
        .route("/admin/services/:id", put(content::update_service).delete(content::delete_service))
        .route("/admin/services/:id/toggle", post(content::toggle_service))
        .route("/admin/formations", get(content::list_formations).post(content::create_formation))
        .route("/admin/formations/:id", put(content::update_formation).delete(content::delete_formation))
        .route("/admin/formations/:id/toggle", post(content::toggle_formation))
        .route("/admin/carousel", get(content::list_carousel).post(content::create_carousel))
        .route("/admin/carousel/:id", put(content::update_carousel).delete(content::delete_carousel))
        .route("/admin/carousel/:id/toggle", post(content::toggle_carousel))
        .route("/admin/about-images", get(content::list_about).post(content::create_about))
        .route("/admin/about-images/:id", put(content::update_about).delete(content::delete_about))
        .route("/admin/about-images/:id/toggle", post(content::toggle_about))
        .route("/admin/partners", get(showcase::list_partners).post(showcase::create_partner))
        .route("/admin/partners/:id", put(showcase::update_partner).delete(showcase::delete_partner))
        .route("/admin/partners/:id/toggle", post(showcase::toggle_partner))
        .route("/admin/brands", get(showcase::list_brands).post(showcase::create_brand))
        .route("/admin/brands/:id", put(showcase::update_brand).delete(showcase::delete_brand))
        .route("/admin/brands/:id/toggle", post(showcase::toggle_brand))
        .route("/admin/reviews", get(showcase::list_reviews).post(showcase::create_review))
        .route("/admin/reviews/:id", put(showcase::update_review).delete(showcase::delete_review))
        .route("/admin/reviews/:id/toggle", post(showcase::toggle_review))
        .route("/admin/jobs", get(recruitment::list_offers).post(recruitment::create_offer))
        .route("/admin/jobs/:id", put(recruitment::update_offer).delete(recruitment::delete_offer))
        .route("/admin/jobs/:id/toggle", post(recruitment::toggle_offer))
        .route("/admin/applications", get(recruitment::list_applications))
        .route(
            "/admin/applications/:id",
            get(recruitment::get_application)
                .put(recruitment::update_application)
                .delete(recruitment::delete_application),
        )
        .route("/admin/spontaneous-applications", get(recruitment::list_spontaneous))
        .route(
            "/admin/spontaneous-applications/:id",
            put(recruitment::update_spontaneous).delete(recruitment::delete_spontaneous),
        )
        .route("/admin/contacts", get(contacts::list))
        .route("/admin/contacts/:id", get(contacts::get).delete(contacts::delete))
        .route("/admin/contacts/:id/processed", put(contacts::set_processed))
        .route("/admin/config", get(settings::get_config))
        .route("/admin/configs", get(settings::list_configs))
        .route("/admin/config/:id", put(settings::update_config))
        .route("/admin/config/:id/activate", post(settings::activate_config))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    let docs = SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi());

    Router::new()
        .nest_service("/media", media_dir)
        .fallback_service(static_dir)
        .merge(public)
        .merge(auth_routes)
        .merge(admin)
        .merge(docs)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
