use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, auth};
use service::storage::MediaStore;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Make sure a developer config.toml never leaks into the tests.
    std::env::set_var("CONFIG_PATH", "/nonexistent-config-for-tests.toml");

    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("migrations notice: {e}");
    }

    let store = MediaStore::new(format!("target/test-media/{}", Uuid::new_v4())).await?;
    let state = auth::ServerState {
        db,
        auth: auth::ServerAuthConfig { jwt_secret: "test-secret".into() },
        store,
    };
    let app: Router = routes::build_router(CorsLayer::very_permissive(), state);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().cookie_store(true).build().expect("reqwest client")
}

async fn login(c: &reqwest::Client, base: &str) -> anyhow::Result<()> {
    let email = format!("e2e_{}@example.com", Uuid::new_v4());
    let password = "E2ePassword1!";
    let res = c
        .post(format!("{base}/auth/register"))
        .json(&json!({"email": email, "name": "E2E", "password": password}))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());
    let res = c
        .post(format!("{base}/auth/login"))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
    Ok(())
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_public_home_payload() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client().get(format!("{}/api/home", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    // get_or_create guarantees a config exists even on an empty database
    assert!(body["config"]["site_name"].is_string());
    assert!(body["services"].is_array());
    assert!(body["carousel"].is_array());
    Ok(())
}

#[tokio::test]
async fn e2e_contact_submission() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = client();
    let res = c
        .post(format!("{}/api/contact", app.base_url))
        .json(&json!({
            "name": "Jean Dupont",
            "email": "jean@example.com",
            "subject": "Devis",
            "message": "Hello, I would like a quote."
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], true);

    // Missing subject is rejected
    let res = c
        .post(format!("{}/api/contact", app.base_url))
        .json(&json!({"name": "X", "email": "x@example.com", "subject": "", "message": "hi"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_upload_and_sync_into_service() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let base = app.base_url.as_str();
    let c = client();
    login(&c, base).await?;

    // Register a media file
    let form = reqwest::multipart::Form::new()
        .part(
            "file",
            reqwest::multipart::Part::bytes(vec![0xFFu8, 0xD8, 0xFF, 0xE0])
                .file_name("hero.jpg")
                .mime_str("image/jpeg")?,
        )
        .text("kind", "service")
        .text("name", "Hero shot");
    let res = c.post(format!("{base}/admin/media")).multipart(form).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let asset: serde_json::Value = res.json().await?;
    let asset_id = asset["id"].as_str().expect("asset id").to_string();
    assert!(asset["file_path"].as_str().expect("file_path").ends_with("hero.jpg"));

    // Create a service without an image
    let res = c
        .post(format!("{base}/admin/services"))
        .json(&json!({
            "title": format!("Audit {}", Uuid::new_v4()),
            "category": "security",
            "description": "Full security audit",
            "short_description": "Audit",
            "icon": "shield"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let svc: serde_json::Value = res.json().await?;
    let svc_id = svc["id"].as_str().expect("service id").to_string();
    assert!(svc["image_path"].is_null());

    // Copy the asset into the service's image field
    let res = c
        .post(format!("{base}/admin/sync"))
        .json(&json!({"asset_id": asset_id, "target_kind": "service", "target_id": svc_id}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let sync: serde_json::Value = res.json().await?;
    assert_eq!(sync["success"], true);
    let path = sync["path"].as_str().expect("synced path");
    assert!(path.starts_with("services/"), "unexpected path: {path}");

    // The service now carries the copied image
    let res = c.get(format!("{base}/admin/services")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let rows: Vec<serde_json::Value> = res.json().await?;
    let row = rows.iter().find(|r| r["id"] == svc_id.as_str()).expect("created service listed");
    assert_eq!(row["image_path"].as_str(), Some(path));
    Ok(())
}

#[tokio::test]
async fn e2e_upload_unrecognized_kind_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let base = app.base_url.as_str();
    let c = client();
    login(&c, base).await?;

    // "thumbnail" is not in the kind taxonomy
    let form = reqwest::multipart::Form::new()
        .part(
            "file",
            reqwest::multipart::Part::bytes(vec![0xFFu8, 0xD8, 0xFF, 0xE0])
                .file_name("thumb.jpg")
                .mime_str("image/jpeg")?,
        )
        .text("kind", "thumbnail");
    let res = c.post(format!("{base}/admin/media")).multipart(form).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["error"], "Validation Error");
    Ok(())
}

#[tokio::test]
async fn e2e_sync_unknown_target_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let base = app.base_url.as_str();
    let c = client();
    login(&c, base).await?;

    let res = c
        .post(format!("{base}/admin/sync"))
        .json(&json!({"asset_id": Uuid::new_v4(), "target_kind": "blog", "target_id": Uuid::new_v4()}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
