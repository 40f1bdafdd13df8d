//! Handlers for `/user`: settings, profile and avatar.

use axum::extract::{Multipart, State};
use axum::Json;
use soundmood_core::account::validate_username;
use soundmood_core::error::CoreError;
use soundmood_core::music::validate_duration;
use soundmood_core::uploads::{
    extract_extension, public_url, stored_filename, validate_avatar_content_type, validate_size,
    IMAGES_SUBDIR, IMAGE_EXTENSIONS,
};
use soundmood_db::models::user::{UpdateProfile, UserResponse};
use soundmood_db::models::user_settings::{UpdateUserSettings, UserSettings};
use soundmood_db::repositories::{UserRepo, UserSettingsRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::upload::{discard_on_error, missing_field, read_upload, save_file};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/user/settings
///
/// Accounts created before settings existed get defaults on first read.
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserSettings>>> {
    let settings = UserSettingsRepo::get_or_create(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/user/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateUserSettings>,
) -> AppResult<Json<DataResponse<UserSettings>>> {
    if input.default_duration.is_some() {
        validate_duration(input.default_duration)?;
    }
    for (field, value) in [
        ("preferred_language", &input.preferred_language),
        ("theme_preference", &input.theme_preference),
        ("default_genre", &input.default_genre),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "{field} must not be empty"
            ))));
        }
    }

    let settings = UserSettingsRepo::update(&state.pool, auth.user_id, &input).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(username) = &input.username {
        input.username = Some(validate_username(username)?);
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth.user_id))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// POST /api/user/avatar
///
/// Multipart field `file`. The image is stored as
/// `images/avatar_{user_id}_{uuid}.{ext}` and becomes the new avatar URL.
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            upload = Some(read_upload(field).await?);
        }
    }
    let upload = upload.ok_or_else(|| missing_field("file"))?;

    validate_avatar_content_type(upload.content_type.as_deref())?;
    validate_size(upload.data.len(), state.config.max_file_size)?;

    let ext = extract_extension(&upload.filename)
        .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or_else(|| "jpg".to_string());
    let filename = stored_filename(&format!("avatar_{}_", auth.user_id), &ext);
    let path = save_file(&state, IMAGES_SUBDIR, &filename, &upload.data).await?;

    let updated = UserRepo::update_profile(
        &state.pool,
        auth.user_id,
        &UpdateProfile {
            username: None,
            avatar_url: Some(public_url(IMAGES_SUBDIR, &filename)),
        },
    )
    .await
    .map_err(AppError::from)
    .and_then(|user| user.ok_or_else(|| AppError::not_found("User", auth.user_id)));
    let user = discard_on_error(&path, updated).await?;

    tracing::info!(user_id = auth.user_id, "Avatar updated");
    Ok(Json(DataResponse { data: user.into() }))
}
