//! Server bootstrap: configuration, database pool, media store and the
//! axum listener.

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::storage::MediaStore;

use crate::routes::auth::{ServerAuthConfig, ServerState};
use crate::routes::build_router;

const FRONTEND_DIR: &str = "frontend";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
}

/// Load `config.toml` when present, otherwise fall back to environment
/// variables so a bare `DATABASE_URL` is enough for development.
fn load_config() -> configs::AppConfig {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "no usable config file, falling back to environment");
            let mut cfg = configs::AppConfig {
                server: configs::ServerConfig {
                    host: env_or("SERVER_HOST", "127.0.0.1"),
                    port: env_or("SERVER_PORT", "8081").parse().unwrap_or(8081),
                },
                ..configs::AppConfig::default()
            };
            cfg.database.url = models::db::DATABASE_URL.clone();
            cfg.database.max_connections = 10;
            cfg.database.min_connections = 2;
            cfg.database.connect_timeout_secs = 30;
            cfg.database.acquire_timeout_secs = 30;
            cfg.storage.normalize_from_env();
            cfg
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config();

    service::runtime::ensure_env(FRONTEND_DIR, &cfg.storage.media_root).await?;

    let store = MediaStore::new(cfg.storage.media_root.as_str())
        .await
        .context("initializing media store")?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .context("connecting to database")?;

    let jwt_secret = env_or("JWT_SECRET", "dev-secret-change-me");
    if jwt_secret == "dev-secret-change-me" {
        warn!("JWT_SECRET not set, using the development default");
    }

    let state = ServerState { db, auth: ServerAuthConfig { jwt_secret }, store };

    let app = build_router(CorsLayer::very_permissive(), state);

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = TcpListener::bind(&addr).await.with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
