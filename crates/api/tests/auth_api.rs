//! HTTP-level integration tests for the `/auth` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, register_user, TEST_PASSWORD};
use soundmood_db::repositories::{UserRepo, UserSettingsRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_returns_token_and_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "email": "  Alice@Example.com ",
        "username": "alice",
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "bearer");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["email"], "alice@example.com");
    assert_eq!(json["user"]["username"], "alice");
    assert!(json["user"].get("password_hash").is_none());

    let user_id = json["user"]["id"].as_i64().unwrap();
    let settings = UserSettingsRepo::find_by_user(&pool, user_id).await.unwrap();
    assert!(settings.is_some(), "registration must create default settings");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "bob").await;

    let body = serde_json::json!({
        "email": "BOB@example.com",
        "username": "bobby",
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_validates_input(pool: PgPool) {
    let app = common::build_test_app(pool);

    for body in [
        serde_json::json!({ "email": "not-an-email", "username": "ok", "password": TEST_PASSWORD }),
        serde_json::json!({ "email": "a@example.com", "username": "x", "password": TEST_PASSWORD }),
        serde_json::json!({ "email": "a@example.com", "username": "ok", "password": "123" }),
    ] {
        let response = post_json(app.clone(), "/api/auth/register", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_id) = register_user(app.clone(), "carol").await;

    let body = serde_json::json!({ "email": "carol@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["id"], user_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "dave").await;

    let body = serde_json::json!({ "email": "dave@example.com", "password": "wrong-password" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "erin").await;
    UserRepo::deactivate(&pool, user_id).await.unwrap();

    let body = serde_json::json!({ "email": "erin@example.com", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_current_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, user_id) = register_user(app.clone(), "frank").await;

    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["username"], "frank");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_valid_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = get(app.clone(), "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.clone(), "/api/auth/me", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Token of a user that has since been deleted.
    let (token, user_id) = register_user(app.clone(), "gina").await;
    UserRepo::delete(&pool, user_id).await.unwrap();
    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_user_token_rejected_everywhere(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "ghost").await;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    for uri in ["/api/music", "/api/user/settings", "/api/playlists"] {
        let response = get_auth(app.clone(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {uri}");
    }

    let body = serde_json::json!({ "title": "Echo", "text": "nobody home" });
    let response = post_json_auth(app, "/api/generate/text", &token, body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_user_cannot_generate(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "sleeper").await;
    UserRepo::deactivate(&pool, user_id).await.unwrap();

    let body = serde_json::json!({ "title": "Dream", "text": "quiet night" });
    let response = post_json_auth(app.clone(), "/api/generate/text", &token, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/music", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM musics")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
