use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use service::auth::{
    domain::{LoginInput, RegisterInput},
    repo::seaorm::SeaOrmAuthRepository,
    service::{AuthConfig, AuthService},
};
use service::storage::MediaStore;

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    pub store: Arc<MediaStore>,
}

impl ServerState {
    fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        let repo = Arc::new(SeaOrmAuthRepository { db: self.db.clone() });
        AuthService::new(
            repo,
            AuthConfig {
                jwt_secret: Some(self.auth.jwt_secret.clone()),
                password_algorithm: "argon2".into(),
            },
        )
    }
}

/// Identity of the admin performing the request, injected by [`require_auth`].
#[derive(Clone, Copy, Debug)]
pub struct Actor(pub Uuid);

#[derive(Serialize)]
pub struct RegisterOutput {
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub token: String,
}

#[derive(Serialize)]
pub struct MeOutput {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    uid: String,
    #[allow(dead_code)]
    exp: usize,
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<RegisterOutput>, JsonApiError> {
    if let Err(e) = models::admin_user::validate_email(&input.email) {
        return Err(JsonApiError::bad_request(e.to_string()));
    }
    if let Err(e) = models::admin_user::validate_name(&input.name) {
        return Err(JsonApiError::bad_request(e.to_string()));
    }
    let svc = state.auth_service();
    match svc.register(input).await {
        Ok(user) => Ok(Json(RegisterOutput { user_id: user.id })),
        Err(service::auth::errors::AuthError::Conflict) => {
            Err(JsonApiError::conflict("account already exists"))
        }
        Err(service::auth::errors::AuthError::Validation(msg)) => Err(JsonApiError::bad_request(msg)),
        Err(e) => Err(JsonApiError::internal(e.to_string())),
    }
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let svc = state.auth_service();
    let session = svc.login(input).await.map_err(|e| JsonApiError::unauthorized(e.to_string()))?;
    let user = session.user;
    match session.token {
        Some(token) => {
            let mut cookie = Cookie::new("auth_token", token.clone());
            cookie.set_path("/");
            cookie.set_http_only(true);
            cookie.set_secure(false);
            cookie.set_same_site(axum_extra::extract::cookie::SameSite::Lax);
            let jar = jar.add(cookie);
            Ok((jar, Json(LoginOutput { user_id: user.id, email: user.email, name: user.name, token })))
        }
        None => Err(JsonApiError::internal("token generation failed")),
    }
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::from("auth_token"));
    (jar, StatusCode::NO_CONTENT)
}

pub async fn me(
    State(state): State<ServerState>,
    jar: CookieJar,
) -> Result<Json<MeOutput>, JsonApiError> {
    let token = jar
        .get("auth_token")
        .map(|c| c.value().to_string())
        .ok_or_else(|| JsonApiError::unauthorized("no auth"))?;
    let claims =
        decode_claims(&token, &state.auth.jwt_secret).map_err(JsonApiError::unauthorized)?;
    let uid =
        Uuid::parse_str(&claims.uid).map_err(|_| JsonApiError::unauthorized("bad token"))?;
    Ok(Json(MeOutput { user_id: uid, email: claims.sub }))
}

fn decode_claims(token: &str, secret: &str) -> Result<Claims, String> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &key, &validation)
        .map(|d| d.claims)
        .map_err(|e| e.to_string())
}

fn token_from_request(req: &Request) -> Option<String> {
    let authz = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if let Some(h) = authz {
        return h.strip_prefix("Bearer ").map(|t| t.to_string());
    }
    // cookie fallback for the dashboard front end
    let cookie_header = req
        .headers()
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    for part in cookie_header.split(';') {
        if let Some(rest) = part.trim().strip_prefix("auth_token=") {
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}

/// Guard for the `/admin` tree: accepts `Authorization: Bearer <jwt>` or
/// the `auth_token` cookie, verifies the signature and expiry, and injects
/// the acting admin's id as an [`Actor`] extension.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if req.method() == axum::http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    let path = req.uri().path().to_string();
    let token = match token_from_request(&req) {
        Some(t) => t,
        None => {
            tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };
    match decode_claims(&token, &state.auth.jwt_secret) {
        Ok(claims) => match Uuid::parse_str(&claims.uid) {
            Ok(uid) => {
                req.extensions_mut().insert(Actor(uid));
                Ok(next.run(req).await)
            }
            Err(_) => {
                tracing::warn!(path = %path, "token carries malformed uid");
                Err(StatusCode::UNAUTHORIZED)
            }
        },
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
