//! Favorite marker: a user "hearts" a music record.

use serde::Serialize;
use soundmood_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub music_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
