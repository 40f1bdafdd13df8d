//! Handlers for favorites ("hearted" music).

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use soundmood_core::types::DbId;
use soundmood_db::models::favorite::Favorite;
use soundmood_db::models::music::Music;
use soundmood_db::repositories::{FavoriteRepo, MusicRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::music::find_visible;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/music/{id}/favorite
///
/// Idempotent: favoriting twice returns the existing marker.
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(music_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Favorite>>)> {
    find_visible(&state, music_id, auth.user_id).await?;
    let favorite = FavoriteRepo::add(&state.pool, auth.user_id, music_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: favorite })))
}

/// DELETE /api/music/{id}/favorite
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(music_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !FavoriteRepo::remove(&state.pool, auth.user_id, music_id).await? {
        return Err(AppError::not_found("Favorite", music_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/music/favorites
///
/// Favorited music, most recently favorited first.
pub async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Music>>>> {
    let favorites = FavoriteRepo::list_for_user(&state.pool, auth.user_id).await?;
    let ids: Vec<DbId> = favorites.iter().map(|f| f.music_id).collect();

    let mut musics: HashMap<DbId, Music> =
        MusicRepo::find_many_visible(&state.pool, &ids, auth.user_id)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

    let data = favorites
        .iter()
        .filter_map(|f| musics.remove(&f.music_id))
        .collect();
    Ok(Json(DataResponse { data }))
}
