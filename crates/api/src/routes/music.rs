//! Route definitions for the `/music` resource, including collections,
//! favorites, journal and stats.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{collection, favorite, journal, music};
use crate::state::AppState;

/// Routes mounted at `/music`.
///
/// ```text
/// GET    /                          -> list_music
/// GET    /collections               -> list_collections
/// POST   /collections               -> add_collection
/// GET    /collections/folders       -> list_folders
/// PATCH  /collections/{id}          -> update_collection
/// DELETE /collections/{id}          -> delete_collection
/// GET    /favorites                 -> list_favorites
/// GET    /journal                   -> get_journal
/// GET    /stats                     -> get_stats
/// GET    /{id}                      -> get_music
/// PATCH  /{id}                      -> update_music
/// DELETE /{id}                      -> delete_music
/// GET    /{id}/status               -> get_status
/// POST   /{id}/play                 -> play_music
/// GET    /{id}/logs                 -> list_logs
/// POST   /{id}/favorite             -> add_favorite
/// DELETE /{id}/favorite             -> remove_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(music::list_music))
        .route(
            "/collections",
            get(collection::list_collections).post(collection::add_collection),
        )
        .route("/collections/folders", get(collection::list_folders))
        .route(
            "/collections/{id}",
            patch(collection::update_collection).delete(collection::delete_collection),
        )
        .route("/favorites", get(favorite::list_favorites))
        .route("/journal", get(journal::get_journal))
        .route("/stats", get(journal::get_stats))
        .route(
            "/{id}",
            get(music::get_music)
                .patch(music::update_music)
                .delete(music::delete_music),
        )
        .route("/{id}/status", get(music::get_status))
        .route("/{id}/play", post(music::play_music))
        .route("/{id}/logs", get(music::list_logs))
        .route(
            "/{id}/favorite",
            post(favorite::add_favorite).delete(favorite::remove_favorite),
        )
}
