#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use soundmood_api::auth::jwt::JwtConfig;
use soundmood_api::config::ServerConfig;
use soundmood_api::router::build_app_router;
use soundmood_api::state::AppState;
use soundmood_pipeline::{GenerationPipeline, PipelineConfig};

/// Upload limit used by tests; small enough to exceed cheaply.
pub const TEST_MAX_FILE_SIZE: usize = 64 * 1024;

pub const TEST_PASSWORD: &str = "secret123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        max_file_size: TEST_MAX_FILE_SIZE,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Full application router over `pool`, with uploads in a shared scratch
/// directory. Generation runs offline: canned analysis and an instant
/// simulated track.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_uploads(pool, &shared_upload_dir())
}

pub fn build_test_app_with_uploads(pool: PgPool, upload_dir: &Path) -> Router {
    let config = test_config(upload_dir);
    let pipeline_config = PipelineConfig {
        upload_dir: upload_dir.to_path_buf(),
        ..PipelineConfig::default()
    };
    let pipeline = Arc::new(GenerationPipeline::from_config(pool.clone(), &pipeline_config));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        pipeline,
    };
    build_app_router(state, &config)
}

fn shared_upload_dir() -> PathBuf {
    std::env::temp_dir().join("soundmood-api-tests")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should be handled")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request should build")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::POST, uri, Some(token))).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

const BOUNDARY: &str = "soundmood-test-boundary";

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    parts: &[Part<'_>],
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(multipart_body(parts)))
        .expect("request should build");
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register through the API; returns `(access_token, user_id)`.
pub async fn register_user(app: Router, name: &str) -> (String, i64) {
    let body = serde_json::json!({
        "email": format!("{name}@example.com"),
        "username": name,
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let token = json["access_token"].as_str().expect("token").to_string();
    let id = json["user"]["id"].as_i64().expect("user id");
    (token, id)
}

/// Submit a text generation; returns the new music id.
pub async fn generate_text(app: Router, token: &str, title: &str) -> i64 {
    let body = serde_json::json!({ "title": title, "text": "a quiet walk after rain" });
    let response = post_json_auth(app, "/api/generate/text", token, body).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("music id")
}

/// Poll `/music/{id}/status` until the record leaves `generating`.
pub async fn wait_for_terminal(app: Router, token: &str, music_id: i64) -> Value {
    for _ in 0..100 {
        let response = get_auth(app.clone(), &format!("/api/music/{music_id}/status"), token).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        if json["data"]["status"] != "generating" {
            return json["data"].clone();
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("music {music_id} still generating");
}
