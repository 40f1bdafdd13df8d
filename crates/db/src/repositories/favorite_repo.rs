//! Repository for the `favorites` table.

use soundmood_core::types::DbId;
use sqlx::PgPool;

use crate::models::favorite::Favorite;

const COLUMNS: &str = "id, user_id, music_id, created_at, updated_at";

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Mark `music_id` as a favorite of `user_id`. Idempotent: an existing
    /// favorite is returned unchanged.
    pub async fn add(pool: &PgPool, user_id: DbId, music_id: DbId) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (user_id, music_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_favorites_user_music
             DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(music_id)
            .fetch_one(pool)
            .await
    }

    /// Returns `true` if a favorite was removed.
    pub async fn remove(pool: &PgPool, user_id: DbId, music_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND music_id = $2")
            .bind(user_id)
            .bind(music_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, user_id: DbId, music_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND music_id = $2)",
        )
        .bind(user_id)
        .bind(music_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// A user's favorites, most recently favorited first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Favorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM favorites WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
