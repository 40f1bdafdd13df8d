//! Repository for the `playlists` and `playlist_items` tables.

use std::collections::HashSet;

use soundmood_core::types::DbId;
use sqlx::PgPool;

use crate::models::playlist::{CreatePlaylist, Playlist, PlaylistItem, UpdatePlaylist};

const COLUMNS: &str =
    "id, user_id, name, description, cover_url, is_public, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, playlist_id, music_id, order_index, created_at, updated_at";

pub struct PlaylistRepo;

impl PlaylistRepo {
    pub async fn create(pool: &PgPool, input: &CreatePlaylist) -> Result<Playlist, sqlx::Error> {
        let query = format!(
            "INSERT INTO playlists (user_id, name, description, cover_url, is_public)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.cover_url)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM playlists WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Playlist>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Own playlists, or public playlists of other users.
    pub async fn find_visible(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM playlists WHERE id = $1 AND (user_id = $2 OR is_public = true)"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// A user's playlists, most recently updated first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Playlist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM playlists WHERE user_id = $1 ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdatePlaylist,
    ) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!(
            "UPDATE playlists SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                cover_url = COALESCE($5, cover_url),
                is_public = COALESCE($6, is_public)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.cover_url)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM playlists WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- items ---------------------------------------------------------------

    /// Append a music record at the end of the playlist.
    ///
    /// Fails with a `uq_playlist_items_playlist_music` unique violation if
    /// the music is already in the playlist.
    pub async fn add_item(
        pool: &PgPool,
        playlist_id: DbId,
        music_id: DbId,
    ) -> Result<PlaylistItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO playlist_items (playlist_id, music_id, order_index)
             SELECT $1, $2, COALESCE(MAX(order_index) + 1, 0)
             FROM playlist_items WHERE playlist_id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, PlaylistItem>(&query)
            .bind(playlist_id)
            .bind(music_id)
            .fetch_one(pool)
            .await?;
        Self::touch(pool, playlist_id).await?;
        Ok(item)
    }

    pub async fn remove_item(
        pool: &PgPool,
        playlist_id: DbId,
        music_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM playlist_items WHERE playlist_id = $1 AND music_id = $2")
                .bind(playlist_id)
                .bind(music_id)
                .execute(pool)
                .await?;
        if result.rows_affected() > 0 {
            Self::touch(pool, playlist_id).await?;
        }
        Ok(result.rows_affected() > 0)
    }

    /// Items in play order.
    pub async fn list_items(
        pool: &PgPool,
        playlist_id: DbId,
    ) -> Result<Vec<PlaylistItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM playlist_items WHERE playlist_id = $1
             ORDER BY order_index ASC, id ASC"
        );
        sqlx::query_as::<_, PlaylistItem>(&query)
            .bind(playlist_id)
            .fetch_all(pool)
            .await
    }

    /// Rewrite `order_index` so items follow `music_ids`.
    ///
    /// `music_ids` must be a permutation of the playlist's current items;
    /// otherwise nothing changes and `false` is returned.
    pub async fn reorder(
        pool: &PgPool,
        playlist_id: DbId,
        music_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Vec<(DbId,)> =
            sqlx::query_as("SELECT music_id FROM playlist_items WHERE playlist_id = $1 FOR UPDATE")
                .bind(playlist_id)
                .fetch_all(&mut *tx)
                .await?;

        let current: HashSet<DbId> = current.into_iter().map(|(id,)| id).collect();
        let requested: HashSet<DbId> = music_ids.iter().copied().collect();
        if requested.len() != music_ids.len() || requested != current {
            tracing::debug!(playlist_id, "Reorder rejected: ids do not match playlist items");
            return Ok(false);
        }

        for (index, music_id) in music_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE playlist_items SET order_index = $3 WHERE playlist_id = $1 AND music_id = $2",
            )
            .bind(playlist_id)
            .bind(music_id)
            .bind(index as i32)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE playlists SET updated_at = NOW() WHERE id = $1")
            .bind(playlist_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Bump `updated_at` so recently edited playlists sort first.
    async fn touch(pool: &PgPool, playlist_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE playlists SET updated_at = NOW() WHERE id = $1")
            .bind(playlist_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
