//! Music entity model and DTOs.
//!
//! `status` and `input_type` are stored as text; see
//! [`soundmood_core::music`] for the allowed values.

use serde::{Deserialize, Serialize};
use soundmood_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `musics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Music {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub input_type: String,
    pub input_content: Option<String>,
    pub emotion_tags: Option<Vec<String>>,
    pub ai_analysis: Option<String>,
    pub music_url: String,
    pub music_format: String,
    pub duration: i32,
    pub file_size: i64,
    pub bpm: i32,
    pub genre: Option<String>,
    pub instruments: Option<Vec<String>>,
    pub status: String,
    pub is_public: bool,
    pub play_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a record before generation starts.
#[derive(Debug, Clone)]
pub struct CreateMusic {
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub input_type: String,
    pub input_content: Option<String>,
    pub duration: i32,
}

/// DTO for `PATCH /music/{id}`. All fields optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMusic {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

/// Everything the generation pipeline writes back once it finishes.
///
/// `music_url` / `file_size` are only meaningful when `status` is
/// `completed`; `input_content` replaces the stored value when set (voice
/// inputs store their transcript there).
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub status: String,
    pub music_url: Option<String>,
    pub file_size: Option<i64>,
    pub emotion_tags: Vec<String>,
    pub ai_analysis: String,
    pub genre: String,
    pub bpm: i32,
    pub instruments: Vec<String>,
    pub input_content: Option<String>,
}

/// Music detail enriched with the caller's favorite flag.
#[derive(Debug, Clone, Serialize)]
pub struct MusicWithFavorite {
    #[serde(flatten)]
    pub music: Music,
    pub is_favorite: bool,
}

/// Paged list response for `GET /music`.
#[derive(Debug, Serialize)]
pub struct MusicList {
    pub total: i64,
    pub items: Vec<Music>,
}

/// Lightweight payload for clients polling a generation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MusicStatusResponse {
    pub id: DbId,
    pub status: String,
    pub music_url: String,
    pub updated_at: Timestamp,
}
