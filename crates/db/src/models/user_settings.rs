//! Per-user preferences (`user_settings`, one row per user).

use serde::{Deserialize, Serialize};
use soundmood_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSettings {
    pub id: DbId,
    pub user_id: DbId,
    pub preferred_language: String,
    pub theme_preference: String,
    pub default_duration: i32,
    pub default_genre: String,
    pub notify_on_complete: bool,
    pub public_profile: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserSettings {
    pub preferred_language: Option<String>,
    pub theme_preference: Option<String>,
    pub default_duration: Option<i32>,
    pub default_genre: Option<String>,
    pub notify_on_complete: Option<bool>,
    pub public_profile: Option<bool>,
}
