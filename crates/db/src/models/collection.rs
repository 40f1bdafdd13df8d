//! Collection entity model and DTOs.

use serde::{Deserialize, Serialize};
use soundmood_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::music::Music;

/// Folder used when the client does not name one.
pub const DEFAULT_FOLDER: &str = "default";

/// A row from the `collections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collection {
    pub id: DbId,
    pub user_id: DbId,
    pub music_id: DbId,
    pub folder_name: String,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a collection row.
#[derive(Debug, Clone)]
pub struct CreateCollection {
    pub user_id: DbId,
    pub music_id: DbId,
    pub folder_name: String,
    pub note: Option<String>,
}

/// DTO for `PATCH /music/collections/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCollection {
    pub folder_name: Option<String>,
    pub note: Option<String>,
}

/// Collection row with the collected music embedded.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse {
    #[serde(flatten)]
    pub collection: Collection,
    pub music: Option<Music>,
}

/// Folder name with the number of collected tracks in it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FolderSummary {
    pub folder_name: String,
    pub count: i64,
}
