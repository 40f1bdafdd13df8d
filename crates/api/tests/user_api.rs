//! HTTP-level integration tests for `/user` settings, profile and avatar.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, multipart_auth, put_json_auth, register_user, Part};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_defaults_and_update(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, user_id) = register_user(app.clone(), "tuner").await;

    let response = get_auth(app.clone(), "/api/user/settings", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], user_id);
    assert_eq!(json["data"]["default_duration"], 30);
    assert_eq!(json["data"]["preferred_language"], "zh");

    let body = serde_json::json!({ "default_duration": 60, "theme_preference": "night" });
    let response = put_json_auth(app.clone(), "/api/user/settings", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["default_duration"], 60);
    assert_eq!(json["data"]["theme_preference"], "night");
    assert_eq!(json["data"]["preferred_language"], "zh");

    for body in [
        serde_json::json!({ "default_duration": 5 }),
        serde_json::json!({ "default_duration": 500 }),
        serde_json::json!({ "default_genre": "  " }),
    ] {
        let response = put_json_auth(app.clone(), "/api/user/settings", &token, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_created_lazily(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "legacy").await;
    sqlx::query("DELETE FROM user_settings WHERE user_id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(app, "/api/user/settings", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["default_duration"], 30);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "renamer").await;

    let body = serde_json::json!({ "username": "  New Name " });
    let response = put_json_auth(app.clone(), "/api/user/profile", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "New Name");
    assert_eq!(json["data"]["email"], "renamer@example.com");

    let body = serde_json::json!({ "username": "x" });
    let response = put_json_auth(app, "/api/user/profile", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_avatar_upload(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with_uploads(pool, uploads.path());
    let (token, user_id) = register_user(app.clone(), "portrait").await;

    let parts = [Part::File {
        name: "file",
        filename: "me.png",
        content_type: "image/png",
        data: b"\x89PNG\r\n\x1a\n",
    }];
    let response = multipart_auth(app.clone(), "/api/user/avatar", &token, &parts).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let url = json["data"]["avatar_url"].as_str().unwrap().to_string();
    let prefix = format!("/uploads/images/avatar_{user_id}_");
    assert!(url.starts_with(&prefix), "unexpected url {url}");
    assert!(url.ends_with(".png"));

    let filename = url.rsplit('/').next().unwrap();
    assert!(uploads.path().join("images").join(filename).exists());

    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(body_json(response).await["data"]["avatar_url"], url.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_avatar_rejects_unsupported_type(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with_uploads(pool, uploads.path());
    let (token, _) = register_user(app.clone(), "svgfan").await;

    let parts = [Part::File {
        name: "file",
        filename: "me.svg",
        content_type: "image/svg+xml",
        data: b"<svg/>",
    }];
    let response = multipart_auth(app.clone(), "/api/user/avatar", &token, &parts).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = multipart_auth(app, "/api/user/avatar", &token, &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
