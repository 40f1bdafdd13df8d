//! Playlist and playlist item models and DTOs.

use serde::{Deserialize, Serialize};
use soundmood_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::music::Music;

/// A row from the `playlists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Playlist {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a playlist.
#[derive(Debug, Clone)]
pub struct CreatePlaylist {
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub is_public: bool,
}

/// DTO for `PATCH /playlists/{id}`. All fields optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePlaylist {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub is_public: Option<bool>,
}

/// A row from the `playlist_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistItem {
    pub id: DbId,
    pub playlist_id: DbId,
    pub music_id: DbId,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One entry of a playlist detail response.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistTrack {
    pub order_index: i32,
    pub added_at: Timestamp,
    pub music: Music,
}

/// Playlist with its tracks in play order.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistDetail {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub items: Vec<PlaylistTrack>,
}
