//! Handlers for the `/music` resource.
//!
//! Every query is scoped to the caller: records of other users are reported
//! as missing, never as forbidden. Public records are visible to everyone
//! only through the play endpoint and the collection/favorite flows.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use soundmood_core::music::{validate_status_filter, validate_title};
use soundmood_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use soundmood_core::types::DbId;
use soundmood_db::models::generation_log::GenerationLog;
use soundmood_db::models::music::{
    Music, MusicList, MusicStatusResponse, MusicWithFavorite, UpdateMusic,
};
use soundmood_db::repositories::{FavoriteRepo, GenerationLogRepo, MusicRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /music`.
#[derive(Debug, Deserialize)]
pub struct MusicListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

/// Response body for `POST /music/{id}/play`.
#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub id: DbId,
    pub play_count: i32,
}

/// GET /api/music
///
/// The caller's records, newest first. `total` counts every record matching
/// the status filter, ignoring pagination.
pub async fn list_music(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MusicListParams>,
) -> AppResult<Json<DataResponse<MusicList>>> {
    let status = validate_status_filter(params.status.as_deref())?;
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.skip);

    let items = MusicRepo::list_for_user(&state.pool, auth.user_id, status, limit, offset).await?;
    let total = MusicRepo::count_for_user(&state.pool, auth.user_id, status).await?;

    Ok(Json(DataResponse {
        data: MusicList { total, items },
    }))
}

/// GET /api/music/{id}
pub async fn get_music(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MusicWithFavorite>>> {
    let music = find_owned(&state, id, auth.user_id).await?;
    let is_favorite = FavoriteRepo::exists(&state.pool, auth.user_id, id).await?;
    Ok(Json(DataResponse {
        data: MusicWithFavorite { music, is_favorite },
    }))
}

/// PATCH /api/music/{id}
pub async fn update_music(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateMusic>,
) -> AppResult<Json<DataResponse<Music>>> {
    if let Some(title) = &input.title {
        input.title = Some(validate_title(title)?);
    }

    let music = MusicRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Music", id))?;
    Ok(Json(DataResponse { data: music }))
}

/// DELETE /api/music/{id}
pub async fn delete_music(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MusicRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(AppError::not_found("Music", id));
    }
    tracing::info!(music_id = id, user_id = auth.user_id, "Music deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/music/{id}/status
///
/// Lightweight polling endpoint for clients waiting on a generation.
pub async fn get_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MusicStatusResponse>>> {
    let status = MusicRepo::find_status(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Music", id))?;
    Ok(Json(DataResponse { data: status }))
}

/// POST /api/music/{id}/play
///
/// Count a play of an own or public record.
pub async fn play_music(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PlayResponse>>> {
    find_visible(&state, id, auth.user_id).await?;

    let play_count = MusicRepo::increment_play_count(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Music", id))?;
    Ok(Json(DataResponse {
        data: PlayResponse { id, play_count },
    }))
}

/// GET /api/music/{id}/logs
pub async fn list_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<GenerationLog>>>> {
    find_owned(&state, id, auth.user_id).await?;
    let logs = GenerationLogRepo::list_by_music(&state.pool, id).await?;
    Ok(Json(DataResponse { data: logs }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Music> {
    MusicRepo::find_owned(&state.pool, id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Music", id))
}

/// Music the caller may reference from collections, favorites and
/// playlists: their own records and public ones.
pub async fn find_visible(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Music> {
    MusicRepo::find_visible(&state.pool, id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Music", id))
}
