//! Repository for the `collections` table.

use soundmood_core::types::DbId;
use sqlx::PgPool;

use crate::models::collection::{Collection, CreateCollection, FolderSummary, UpdateCollection};

const COLUMNS: &str = "id, user_id, music_id, folder_name, note, created_at, updated_at";

pub struct CollectionRepo;

impl CollectionRepo {
    /// Insert a collection row.
    ///
    /// Fails with a `uq_collections_user_music` unique violation when the
    /// user already collected this music.
    pub async fn create(pool: &PgPool, input: &CreateCollection) -> Result<Collection, sqlx::Error> {
        let query = format!(
            "INSERT INTO collections (user_id, music_id, folder_name, note)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(input.user_id)
            .bind(input.music_id)
            .bind(&input.folder_name)
            .bind(&input.note)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user_and_music(
        pool: &PgPool,
        user_id: DbId,
        music_id: DbId,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM collections WHERE user_id = $1 AND music_id = $2");
        sqlx::query_as::<_, Collection>(&query)
            .bind(user_id)
            .bind(music_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's collections, newest first, optionally within one folder.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        folder_name: Option<&str>,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR folder_name = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(user_id)
            .bind(folder_name)
            .fetch_all(pool)
            .await
    }

    /// Distinct folder names with item counts, alphabetical.
    pub async fn list_folders(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FolderSummary>, sqlx::Error> {
        sqlx::query_as::<_, FolderSummary>(
            "SELECT folder_name, COUNT(*) AS count FROM collections
             WHERE user_id = $1
             GROUP BY folder_name
             ORDER BY folder_name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Move a collection to another folder and/or change its note.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateCollection,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections SET
                folder_name = COALESCE($3, folder_name),
                note = COALESCE($4, note)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.folder_name)
            .bind(&input.note)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
