pub mod auth;
pub mod generate;
pub mod health;
pub mod music;
pub mod playlist;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/me                              current user
///
/// /music                                list (?skip, limit, status)
/// /music/collections                    list (?folder_name), add
/// /music/collections/folders            folder names with counts
/// /music/collections/{id}               update, delete
/// /music/favorites                      list favorited music
/// /music/journal                        entries by day (?from, to)
/// /music/stats                          per-user aggregates
/// /music/{id}                           get, update, delete
/// /music/{id}/status                    generation status (polling)
/// /music/{id}/play                      count a play (POST)
/// /music/{id}/logs                      generation logs
/// /music/{id}/favorite                  add, remove (POST, DELETE)
///
/// /generate/text                        JSON input (202)
/// /generate/voice                       multipart audio (202)
/// /generate/image                       multipart image (202)
///
/// /playlists                            list, create
/// /playlists/{id}                       get, update, delete
/// /playlists/{id}/items                 add item (POST)
/// /playlists/{id}/items/order           reorder (PUT)
/// /playlists/{id}/items/{music_id}      remove item (DELETE)
///
/// /user/settings                        get, update (PUT)
/// /user/profile                         update (PUT)
/// /user/avatar                          upload (multipart POST)
/// ```
///
/// Everything except register and login requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/music", music::router())
        .nest("/generate", generate::router())
        .nest("/playlists", playlist::router())
        .nest("/user", user::router())
}
