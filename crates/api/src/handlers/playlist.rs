//! Handlers for the `/playlists` resource and its ordered items.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use soundmood_core::error::CoreError;
use soundmood_core::types::DbId;
use soundmood_db::models::music::Music;
use soundmood_db::models::playlist::{
    CreatePlaylist, Playlist, PlaylistDetail, PlaylistItem, PlaylistTrack, UpdatePlaylist,
};
use soundmood_db::repositories::{MusicRepo, PlaylistRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::music::find_visible;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_PLAYLIST_NAME_LEN: usize = 100;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub music_id: DbId,
}

/// Request body for `PUT /playlists/{id}/items/order`: every music id of
/// the playlist, in the new play order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub music_ids: Vec<DbId>,
}

/// GET /api/playlists
pub async fn list_playlists(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Playlist>>>> {
    let playlists = PlaylistRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: playlists }))
}

/// POST /api/playlists
pub async fn create_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreatePlaylistRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Playlist>>)> {
    let name = validate_playlist_name(&input.name)?;
    let playlist = PlaylistRepo::create(
        &state.pool,
        &CreatePlaylist {
            user_id: auth.user_id,
            name,
            description: input.description,
            cover_url: input.cover_url,
            is_public: input.is_public,
        },
    )
    .await?;

    tracing::info!(playlist_id = playlist.id, user_id = auth.user_id, "Playlist created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: playlist })))
}

/// GET /api/playlists/{id}
///
/// Own playlists and public playlists of other users. Tracks the caller
/// cannot see (another user's private music) are left out.
pub async fn get_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PlaylistDetail>>> {
    let playlist = PlaylistRepo::find_visible(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Playlist", id))?;
    let detail = load_detail(&state, playlist, auth.user_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/playlists/{id}
pub async fn update_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePlaylist>,
) -> AppResult<Json<DataResponse<Playlist>>> {
    if let Some(name) = &input.name {
        input.name = Some(validate_playlist_name(name)?);
    }
    let playlist = PlaylistRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Playlist", id))?;
    Ok(Json(DataResponse { data: playlist }))
}

/// DELETE /api/playlists/{id}
pub async fn delete_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PlaylistRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(AppError::not_found("Playlist", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/playlists/{id}/items
///
/// Append a track. Adding a track twice is a 409.
pub async fn add_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AddItemRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PlaylistItem>>)> {
    find_owned(&state, id, auth.user_id).await?;
    find_visible(&state, input.music_id, auth.user_id).await?;

    let item = PlaylistRepo::add_item(&state.pool, id, input.music_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// DELETE /api/playlists/{id}/items/{music_id}
pub async fn remove_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, music_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    find_owned(&state, id, auth.user_id).await?;
    if !PlaylistRepo::remove_item(&state.pool, id, music_id).await? {
        return Err(AppError::not_found("Playlist item", music_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/playlists/{id}/items/order
pub async fn reorder_items(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<PlaylistDetail>>> {
    let playlist = find_owned(&state, id, auth.user_id).await?;
    if !PlaylistRepo::reorder(&state.pool, id, &input.music_ids).await? {
        return Err(AppError::BadRequest(
            "music_ids must list every track of the playlist exactly once".into(),
        ));
    }
    let detail = load_detail(&state, playlist, auth.user_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Playlist> {
    PlaylistRepo::find_owned(&state.pool, id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Playlist", id))
}

async fn load_detail(
    state: &AppState,
    playlist: Playlist,
    viewer_id: DbId,
) -> AppResult<PlaylistDetail> {
    let items = PlaylistRepo::list_items(&state.pool, playlist.id).await?;
    let ids: Vec<DbId> = items.iter().map(|i| i.music_id).collect();
    let mut musics: HashMap<DbId, Music> =
        MusicRepo::find_many_visible(&state.pool, &ids, viewer_id)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

    let items = items
        .into_iter()
        .filter_map(|item| {
            musics.remove(&item.music_id).map(|music| PlaylistTrack {
                order_index: item.order_index,
                added_at: item.created_at,
                music,
            })
        })
        .collect();
    Ok(PlaylistDetail { playlist, items })
}

fn validate_playlist_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Playlist name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_PLAYLIST_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Playlist name must be at most {MAX_PLAYLIST_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
