//! HTTP-level integration tests for `/music`, collections, favorites,
//! journal and stats.
//!
//! Music rows are created through the repository layer so these tests do
//! not depend on the generation pipeline.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_auth, post_json_auth, register_user,
};
use soundmood_db::models::music::{CreateMusic, UpdateMusic};
use soundmood_db::repositories::MusicRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_music(pool: &PgPool, user_id: i64, title: &str) -> i64 {
    MusicRepo::create(
        pool,
        &CreateMusic {
            user_id,
            title: title.to_string(),
            description: None,
            input_type: "text".to_string(),
            input_content: Some("sunny morning".to_string()),
            duration: 30,
        },
    )
    .await
    .expect("music creation should succeed")
    .id
}

async fn make_public(pool: &PgPool, id: i64, user_id: i64) {
    MusicRepo::update(
        pool,
        id,
        user_id,
        &UpdateMusic {
            is_public: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("music should exist");
}

// ---------------------------------------------------------------------------
// Music CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_music_pagination_and_filter(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "lister").await;
    for i in 0..3 {
        seed_music(&pool, user_id, &format!("track {i}")).await;
    }
    let failed = seed_music(&pool, user_id, "broken").await;
    MusicRepo::mark_failed(&pool, failed).await.unwrap();

    let response = get_auth(app.clone(), "/api/music?limit=2", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 4);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);
    // Newest first.
    assert_eq!(json["data"]["items"][0]["title"], "broken");

    let response = get_auth(app.clone(), "/api/music?status=failed", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["id"], failed);

    let response = get_auth(app, "/api/music?status=bogus", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_music_is_scoped_to_owner(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (owner_token, owner_id) = register_user(app.clone(), "owner").await;
    let (other_token, _) = register_user(app.clone(), "other").await;
    let id = seed_music(&pool, owner_id, "mine").await;

    let response = get_auth(app.clone(), &format!("/api/music/{id}"), &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "mine");
    assert_eq!(json["data"]["is_favorite"], false);

    let response = get_auth(app.clone(), &format!("/api/music/{id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &format!("/api/music/{id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, "/api/music", &other_token).await;
    assert_eq!(body_json(response).await["data"]["total"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete_music(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "editor").await;
    let id = seed_music(&pool, user_id, "draft").await;

    let body = serde_json::json!({ "title": "  final  ", "is_public": true });
    let response = patch_json_auth(app.clone(), &format!("/api/music/{id}"), &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "final");
    assert_eq!(json["data"]["is_public"], true);

    let body = serde_json::json!({ "title": "   " });
    let response = patch_json_auth(app.clone(), &format!("/api/music/{id}"), &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete_auth(app.clone(), &format!("/api/music/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/music/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_endpoint(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "poller").await;
    let id = seed_music(&pool, user_id, "pending").await;

    let response = get_auth(app, &format!("/api/music/{id}/status"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["status"], "generating");
    assert_eq!(json["data"]["music_url"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_counts_own_and_public_music(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (owner_token, owner_id) = register_user(app.clone(), "artist").await;
    let (fan_token, _) = register_user(app.clone(), "fan").await;
    let id = seed_music(&pool, owner_id, "single").await;

    let response = post_auth(app.clone(), &format!("/api/music/{id}/play"), &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["play_count"], 1);

    // Private music is invisible to others.
    let response = post_auth(app.clone(), &format!("/api/music/{id}/play"), &fan_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    make_public(&pool, id, owner_id).await;
    let response = post_auth(app, &format!("/api/music/{id}/play"), &fan_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["play_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logs_of_unowned_music_are_hidden(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (owner_token, owner_id) = register_user(app.clone(), "logger").await;
    let (other_token, _) = register_user(app.clone(), "snoop").await;
    let id = seed_music(&pool, owner_id, "logged").await;

    let response = get_auth(app.clone(), &format!("/api/music/{id}/logs"), &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], serde_json::json!([]));

    let response = get_auth(app, &format!("/api/music/{id}/logs"), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_collection_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "collector").await;
    let first = seed_music(&pool, user_id, "first").await;
    let second = seed_music(&pool, user_id, "second").await;

    let body = serde_json::json!({ "music_id": first });
    let response = post_json_auth(app.clone(), "/api/music/collections", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["folder_name"], "default");

    let body = serde_json::json!({ "music_id": second, "folder_name": "rainy", "note": "for walks" });
    let response = post_json_auth(app.clone(), "/api/music/collections", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let rainy_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Duplicate.
    let body = serde_json::json!({ "music_id": first, "folder_name": "other" });
    let response = post_json_auth(app.clone(), "/api/music/collections", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get_auth(app.clone(), "/api/music/collections", &token).await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["music"]["title"], "second");
    assert_eq!(items[0]["note"], "for walks");

    let response = get_auth(app.clone(), "/api/music/collections?folder_name=rainy", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get_auth(app.clone(), "/api/music/collections/folders", &token).await;
    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        serde_json::json!([
            { "folder_name": "default", "count": 1 },
            { "folder_name": "rainy", "count": 1 },
        ])
    );

    let body = serde_json::json!({ "folder_name": "default" });
    let uri = format!("/api/music/collections/{rainy_id}");
    let response = patch_json_auth(app.clone(), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["folder_name"], "default");

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_collect_requires_visible_music(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, owner_id) = register_user(app.clone(), "maker").await;
    let (token, _) = register_user(app.clone(), "browser").await;
    let id = seed_music(&pool, owner_id, "secret").await;

    let body = serde_json::json!({ "music_id": id });
    let response = post_json_auth(app.clone(), "/api/music/collections", &token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    make_public(&pool, id, owner_id).await;
    let response = post_json_auth(app, "/api/music/collections", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorites(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "hearts").await;
    let a = seed_music(&pool, user_id, "a").await;
    let b = seed_music(&pool, user_id, "b").await;

    for id in [a, b, a] {
        let response = post_auth(app.clone(), &format!("/api/music/{id}/favorite"), &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app.clone(), &format!("/api/music/{a}"), &token).await;
    assert_eq!(body_json(response).await["data"]["is_favorite"], true);

    let response = get_auth(app.clone(), "/api/music/favorites", &token).await;
    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["b", "a"]);

    let response = delete_auth(app.clone(), &format!("/api/music/{b}/favorite"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app, &format!("/api/music/{b}/favorite"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_music_made_private_disappears_from_other_users_lists(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (owner_token, owner_id) = register_user(app.clone(), "diarist").await;
    let (token, _) = register_user(app.clone(), "reader").await;
    let id = seed_music(&pool, owner_id, "secret").await;
    make_public(&pool, id, owner_id).await;

    let body = serde_json::json!({ "music_id": id });
    let response = post_json_auth(app.clone(), "/api/music/collections", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = post_auth(app.clone(), &format!("/api/music/{id}/favorite"), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "is_public": false });
    let response = patch_json_auth(app.clone(), &format!("/api/music/{id}"), &owner_token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), "/api/music/favorites", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!([]));

    let response = get_auth(app.clone(), "/api/music/collections", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert!(json["data"][0]["music"].is_null());
    assert!(!json.to_string().contains("sunny morning"));

    // The owner still sees their own record.
    let response = get_auth(app, &format!("/api/music/{id}"), &owner_token).await;
    assert_eq!(body_json(response).await["data"]["input_content"], "sunny morning");
}

// ---------------------------------------------------------------------------
// Journal and stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_journal_groups_by_day(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "diarist").await;
    let old = seed_music(&pool, user_id, "last week").await;
    seed_music(&pool, user_id, "today one").await;
    seed_music(&pool, user_id, "today two").await;
    sqlx::query("UPDATE musics SET created_at = NOW() - INTERVAL '7 days' WHERE id = $1")
        .bind(old)
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(app.clone(), "/api/music/journal", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 3);
    let days = json["data"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["count"], 2);
    assert_eq!(days[1]["entries"][0]["title"], "last week");

    for uri in [
        "/api/music/journal?from=2024-02-01&to=2024-01-01",
        "/api/music/journal?from=%2B262142-12-20&to=%2B262142-12-31",
        "/api/music/journal?to=%2B262142-12-31",
    ] {
        let response = get_auth(app.clone(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "GET {uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = register_user(app.clone(), "counter").await;
    let a = seed_music(&pool, user_id, "a").await;
    seed_music(&pool, user_id, "b").await;
    MusicRepo::mark_failed(&pool, a).await.unwrap();
    post_auth(app.clone(), &format!("/api/music/{a}/favorite"), &token).await;

    let response = get_auth(app, "/api/music/stats", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["failed"], 1);
    assert_eq!(json["data"]["generating"], 1);
    assert_eq!(json["data"]["text"], 2);
    assert_eq!(json["data"]["favorites"], 1);
    assert_eq!(json["data"]["total_duration"], 0, "only completed tracks count");
    assert!(json["data"]["top_emotions"].is_array());
}
