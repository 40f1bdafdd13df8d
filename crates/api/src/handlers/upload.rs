//! Multipart helpers shared by the upload endpoints.

use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// One uploaded file held in memory.
pub struct Upload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

pub async fn read_text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

pub async fn read_upload(field: Field<'_>) -> AppResult<Upload> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .to_vec();
    Ok(Upload {
        filename,
        content_type,
        data,
    })
}

pub fn missing_field(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing '{name}' field"))
}

/// Write `data` to `{upload_dir}/{subdir}/{filename}`, creating the
/// directory if needed.
pub async fn save_file(
    state: &AppState,
    subdir: &str,
    filename: &str,
    data: &[u8],
) -> AppResult<PathBuf> {
    let dir = state.config.upload_dir.join(subdir);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let path = dir.join(filename);
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;
    Ok(path)
}

/// Pass `result` through, deleting the stored file at `path` if it is an
/// error so a failed database write leaves no orphan upload behind.
pub async fn discard_on_error<T>(path: &Path, result: AppResult<T>) -> AppResult<T> {
    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove orphaned upload");
        }
    }
    result
}
