//! Aggregates behind `GET /music/stats`.

use serde::Serialize;
use sqlx::FromRow;

/// Per-user music counters computed in a single query.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct MusicCounters {
    pub total: i64,
    pub completed: i64,
    pub failed: i64,
    pub generating: i64,
    pub voice: i64,
    pub text: i64,
    pub image: i64,
    pub public: i64,
    pub total_duration: i64,
    pub total_plays: i64,
}

/// How often an emotion tag appears across a user's records.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: i64,
}

/// Full stats response.
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    #[serde(flatten)]
    pub music: MusicCounters,
    pub favorites: i64,
    pub collections: i64,
    pub playlists: i64,
    pub top_emotions: Vec<EmotionCount>,
}
