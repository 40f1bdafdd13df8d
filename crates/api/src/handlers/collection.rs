//! Handlers for `/music/collections`: a user's bookmarked music grouped into
//! named folders.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use soundmood_core::error::CoreError;
use soundmood_core::types::DbId;
use soundmood_db::models::collection::{
    Collection, CollectionResponse, CreateCollection, FolderSummary, UpdateCollection,
    DEFAULT_FOLDER,
};
use soundmood_db::repositories::{CollectionRepo, MusicRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::music::find_visible;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /music/collections`.
#[derive(Debug, Deserialize)]
pub struct AddCollectionRequest {
    pub music_id: DbId,
    pub folder_name: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionListParams {
    pub folder_name: Option<String>,
}

/// POST /api/music/collections
pub async fn add_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<AddCollectionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Collection>>)> {
    find_visible(&state, input.music_id, auth.user_id).await?;

    if CollectionRepo::find_by_user_and_music(&state.pool, auth.user_id, input.music_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Music is already in your collection".into(),
        )));
    }

    let collection = CollectionRepo::create(
        &state.pool,
        &CreateCollection {
            user_id: auth.user_id,
            music_id: input.music_id,
            folder_name: folder_or_default(input.folder_name.as_deref()),
            note: input.note,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: collection })))
}

/// GET /api/music/collections
///
/// Newest first, each entry carrying the collected music. `music` is null
/// once the owner has made the record private.
pub async fn list_collections(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<CollectionListParams>,
) -> AppResult<Json<DataResponse<Vec<CollectionResponse>>>> {
    let folder = params
        .folder_name
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty());
    let collections = CollectionRepo::list_for_user(&state.pool, auth.user_id, folder).await?;

    let ids: Vec<DbId> = collections.iter().map(|c| c.music_id).collect();
    let mut musics: HashMap<DbId, _> =
        MusicRepo::find_many_visible(&state.pool, &ids, auth.user_id)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

    let data = collections
        .into_iter()
        .map(|collection| CollectionResponse {
            music: musics.remove(&collection.music_id),
            collection,
        })
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/music/collections/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FolderSummary>>>> {
    let folders = CollectionRepo::list_folders(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: folders }))
}

/// PATCH /api/music/collections/{id}
pub async fn update_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCollection>,
) -> AppResult<Json<DataResponse<Collection>>> {
    if let Some(folder) = input.folder_name.as_deref() {
        input.folder_name = Some(folder_or_default(Some(folder)));
    }

    let collection = CollectionRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Collection", id))?;
    Ok(Json(DataResponse { data: collection }))
}

/// DELETE /api/music/collections/{id}
pub async fn delete_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CollectionRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(AppError::not_found("Collection", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Blank folder names fall back to [`DEFAULT_FOLDER`].
fn folder_or_default(folder: Option<&str>) -> String {
    match folder.map(str::trim) {
        Some(f) if !f.is_empty() => f.to_string(),
        _ => DEFAULT_FOLDER.to_string(),
    }
}
