//! Handlers for `/generate`: create a music record in `generating` state and
//! hand the input to the background pipeline.
//!
//! All three endpoints answer `202 Accepted` immediately; clients poll
//! `GET /music/{id}/status` until the record reaches a terminal status.

use std::path::PathBuf;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use soundmood_core::error::CoreError;
use soundmood_core::music::{validate_duration, validate_title, InputType};
use soundmood_core::uploads::{
    public_url, stored_filename, validate_extension, validate_size, AUDIO_EXTENSIONS,
    IMAGES_SUBDIR, IMAGE_EXTENSIONS, TEMP_SUBDIR,
};
use soundmood_db::models::music::{CreateMusic, Music};
use soundmood_db::repositories::MusicRepo;
use soundmood_pipeline::{GenerationJob, JobInput};

use crate::error::{AppError, AppResult};
use crate::handlers::upload::{
    discard_on_error, missing_field, read_text, read_upload, save_file, Upload,
};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /generate/text`.
#[derive(Debug, Deserialize)]
pub struct TextGenerateRequest {
    pub title: String,
    pub text: String,
    pub duration: Option<i32>,
    pub description: Option<String>,
}

type Accepted = (StatusCode, Json<DataResponse<Music>>);

/// POST /api/generate/text
pub async fn generate_from_text(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<TextGenerateRequest>,
) -> AppResult<Accepted> {
    let title = validate_title(&input.title)?;
    let duration = validate_duration(input.duration)?;
    let text = input.text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Text must not be empty".into(),
        )));
    }

    let music = MusicRepo::create(
        &state.pool,
        &CreateMusic {
            user_id: auth.user_id,
            title,
            description: input.description,
            input_type: InputType::Text.as_str().to_string(),
            input_content: Some(text.clone()),
            duration,
        },
    )
    .await?;

    Ok(start_job(&state, music, JobInput::Text(text)))
}

/// POST /api/generate/voice
///
/// Multipart fields: `title`, `audio`, optional `duration`.
pub async fn generate_from_voice(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> AppResult<Accepted> {
    let form = GenerateForm::read(multipart, "audio").await?;
    let (title, duration) = form.validated_fields()?;
    let upload = form.file.ok_or_else(|| missing_field("audio"))?;
    let ext = validate_extension(&upload.filename, AUDIO_EXTENSIONS)?;
    validate_size(upload.data.len(), state.config.max_file_size)?;

    let (path, url) = store_upload(&state, TEMP_SUBDIR, &ext, &upload.data).await?;

    let created = MusicRepo::create(
        &state.pool,
        &CreateMusic {
            user_id: auth.user_id,
            title,
            description: None,
            input_type: InputType::Voice.as_str().to_string(),
            // Replaced by the transcript once the pipeline has run.
            input_content: Some(url),
            duration,
        },
    )
    .await
    .map_err(AppError::from);
    let music = discard_on_error(&path, created).await?;

    Ok(start_job(&state, music, JobInput::Voice(path)))
}

/// POST /api/generate/image
///
/// Multipart fields: `title`, `image`, optional `duration`.
pub async fn generate_from_image(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> AppResult<Accepted> {
    let form = GenerateForm::read(multipart, "image").await?;
    let (title, duration) = form.validated_fields()?;
    let upload = form.file.ok_or_else(|| missing_field("image"))?;
    let ext = validate_extension(&upload.filename, IMAGE_EXTENSIONS)?;
    validate_size(upload.data.len(), state.config.max_file_size)?;

    let (path, url) = store_upload(&state, IMAGES_SUBDIR, &ext, &upload.data).await?;

    let created = MusicRepo::create(
        &state.pool,
        &CreateMusic {
            user_id: auth.user_id,
            title,
            description: None,
            input_type: InputType::Image.as_str().to_string(),
            input_content: Some(url),
            duration,
        },
    )
    .await
    .map_err(AppError::from);
    let music = discard_on_error(&path, created).await?;

    Ok(start_job(&state, music, JobInput::Image(path)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn start_job(state: &AppState, music: Music, input: JobInput) -> Accepted {
    tracing::info!(
        music_id = music.id,
        user_id = music.user_id,
        input_type = %input.input_type(),
        "Generation accepted",
    );
    state.pipeline.spawn(GenerationJob {
        music_id: music.id,
        input,
        duration: music.duration,
    });
    (StatusCode::ACCEPTED, Json(DataResponse { data: music }))
}

/// Fields of a voice/image generation form.
struct GenerateForm {
    title: Option<String>,
    duration: Option<String>,
    file: Option<Upload>,
}

impl GenerateForm {
    /// Read all fields; `file_field` names the part carrying the upload.
    async fn read(mut multipart: Multipart, file_field: &str) -> AppResult<Self> {
        let mut form = GenerateForm {
            title: None,
            duration: None,
            file: None,
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = Some(read_text(field).await?),
                "duration" => form.duration = Some(read_text(field).await?),
                n if n == file_field => form.file = Some(read_upload(field).await?),
                _ => {}
            }
        }
        Ok(form)
    }

    fn validated_fields(&self) -> AppResult<(String, i32)> {
        let title = self.title.as_deref().ok_or_else(|| missing_field("title"))?;
        let title = validate_title(title)?;

        let duration = match self.duration.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
                AppError::BadRequest(format!("Invalid duration '{raw}'"))
            })?),
        };
        Ok((title, validate_duration(duration)?))
    }
}

/// Write `data` to `{upload_dir}/{subdir}/{uuid}.{ext}`.
///
/// Returns the on-disk path and the public URL.
async fn store_upload(
    state: &AppState,
    subdir: &str,
    ext: &str,
    data: &[u8],
) -> AppResult<(PathBuf, String)> {
    let filename = stored_filename("", ext);
    let path = save_file(state, subdir, &filename, data).await?;
    Ok((path, public_url(subdir, &filename)))
}
