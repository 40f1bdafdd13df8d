//! Upload naming and type checks for audio, image and avatar files.
//!
//! Uploaded files are written under the configured upload directory:
//!
//! ```text
//! uploads/
//!   music/    generated tracks        (served as /uploads/music/...)
//!   images/   image inputs + avatars  (served as /uploads/images/...)
//!   temp/     voice recordings awaiting transcription
//! ```

use uuid::Uuid;

use crate::error::CoreError;

pub const MUSIC_SUBDIR: &str = "music";
pub const IMAGES_SUBDIR: &str = "images";
pub const TEMP_SUBDIR: &str = "temp";

/// URL prefix under which the upload directory is served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Default maximum upload size: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "ogg", "webm", "aac", "flac"];
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// MIME types accepted for avatar uploads.
pub const AVATAR_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Lowercased extension of `filename`, if it has one.
pub fn extract_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Validate an extension against an allowlist. Returns the lowercased extension.
pub fn validate_extension(filename: &str, allowed: &[&str]) -> Result<String, CoreError> {
    let ext = extract_extension(filename).unwrap_or_default();
    if allowed.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported file type '.{ext}'. Supported: {}",
            allowed.join(", ")
        )))
    }
}

pub fn validate_size(size: usize, max: usize) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > max {
        return Err(CoreError::PayloadTooLarge { size, max });
    }
    Ok(())
}

pub fn validate_avatar_content_type(content_type: Option<&str>) -> Result<(), CoreError> {
    match content_type {
        Some(ct) if AVATAR_CONTENT_TYPES.contains(&ct) => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Unsupported image format. Supported: {}",
            AVATAR_CONTENT_TYPES.join(", ")
        ))),
    }
}

/// MIME type for an image extension, defaulting to JPEG.
pub fn image_media_type(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// MIME type for an audio extension, defaulting to MPEG.
pub fn audio_media_type(ext: &str) -> &'static str {
    match ext {
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "ogg" => "audio/ogg",
        "webm" => "audio/webm",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        _ => "audio/mpeg",
    }
}

/// Unique on-disk filename: `{prefix}{uuid}.{ext}`.
pub fn stored_filename(prefix: &str, ext: &str) -> String {
    format!("{prefix}{}.{ext}", Uuid::new_v4())
}

/// Public URL of a file stored in `subdir`.
pub fn public_url(subdir: &str, filename: &str) -> String {
    format!("{PUBLIC_PREFIX}/{subdir}/{filename}")
}
