//! Route definitions for the `/playlists` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::playlist;
use crate::state::AppState;

/// Routes mounted at `/playlists`.
///
/// ```text
/// GET    /                         -> list_playlists
/// POST   /                         -> create_playlist
/// GET    /{id}                     -> get_playlist
/// PATCH  /{id}                     -> update_playlist
/// DELETE /{id}                     -> delete_playlist
/// POST   /{id}/items               -> add_item
/// PUT    /{id}/items/order         -> reorder_items
/// DELETE /{id}/items/{music_id}    -> remove_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(playlist::list_playlists).post(playlist::create_playlist),
        )
        .route(
            "/{id}",
            get(playlist::get_playlist)
                .patch(playlist::update_playlist)
                .delete(playlist::delete_playlist),
        )
        .route("/{id}/items", post(playlist::add_item))
        .route("/{id}/items/order", put(playlist::reorder_items))
        .route("/{id}/items/{music_id}", delete(playlist::remove_item))
}
