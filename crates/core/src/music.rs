//! Music record vocabulary: input types, generation statuses and field limits.
//!
//! Statuses and input types are stored as lowercase text in the `musics`
//! table; the enums here are the single source of truth for those strings.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits and defaults
// ---------------------------------------------------------------------------

/// Shortest track a user may request, in seconds.
pub const MIN_DURATION_SECS: i32 = 15;
/// Longest track a user may request, in seconds.
pub const MAX_DURATION_SECS: i32 = 120;
/// Duration used when the request does not specify one.
pub const DEFAULT_DURATION_SECS: i32 = 30;
/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 255;
/// Default tempo stored on a fresh record and when analysis omits one.
pub const DEFAULT_BPM: i32 = 120;
/// Container format of generated tracks.
pub const DEFAULT_MUSIC_FORMAT: &str = "mp3";

// ---------------------------------------------------------------------------
// Input type
// ---------------------------------------------------------------------------

/// The kind of input a journal entry was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Voice,
    Text,
    Image,
}

impl InputType {
    pub const ALL: [InputType; 3] = [InputType::Voice, InputType::Text, InputType::Image];

    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Voice => "voice",
            InputType::Text => "text",
            InputType::Image => "image",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid input type '{value}'. Must be one of: voice, text, image"
                ))
            })
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle of a music record: `generating` until the background task
/// finishes, then `completed` or `failed`. There are no other transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicStatus {
    Generating,
    Completed,
    Failed,
}

impl MusicStatus {
    pub const ALL: [MusicStatus; 3] = [
        MusicStatus::Generating,
        MusicStatus::Completed,
        MusicStatus::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MusicStatus::Generating => "generating",
            MusicStatus::Completed => "completed",
            MusicStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{value}'. Must be one of: generating, completed, failed"
                ))
            })
    }
}

impl std::fmt::Display for MusicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Trim and validate a music title. Returns the trimmed title.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Resolve the requested duration, applying the default when absent.
pub fn validate_duration(duration: Option<i32>) -> Result<i32, CoreError> {
    let duration = duration.unwrap_or(DEFAULT_DURATION_SECS);
    if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&duration) {
        return Err(CoreError::Validation(format!(
            "Duration must be between {MIN_DURATION_SECS} and {MAX_DURATION_SECS} seconds"
        )));
    }
    Ok(duration)
}

/// Parse an optional `?status=` filter. Empty strings mean "no filter".
pub fn validate_status_filter(status: Option<&str>) -> Result<Option<MusicStatus>, CoreError> {
    match status.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => MusicStatus::parse(s).map(Some),
    }
}
