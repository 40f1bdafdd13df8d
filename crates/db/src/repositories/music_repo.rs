//! Repository for the `musics` table.

use soundmood_core::music::MusicStatus;
use soundmood_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::music::{CreateMusic, GenerationResult, Music, MusicStatusResponse, UpdateMusic};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, input_type, input_content, \
                       emotion_tags, ai_analysis, music_url, music_format, duration, file_size, \
                       bpm, genre, instruments, status, is_public, play_count, created_at, updated_at";

/// Provides CRUD operations for music records.
pub struct MusicRepo;

impl MusicRepo {
    /// Insert a record in `generating` state with an empty `music_url`.
    pub async fn create(pool: &PgPool, input: &CreateMusic) -> Result<Music, sqlx::Error> {
        let query = format!(
            "INSERT INTO musics (user_id, title, description, input_type, input_content, duration, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Music>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.input_type)
            .bind(&input.input_content)
            .bind(input.duration)
            .bind(MusicStatus::Generating.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a record by ID regardless of owner.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Music>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM musics WHERE id = $1");
        sqlx::query_as::<_, Music>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a record owned by `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Music>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM musics WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Music>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a record that `user_id` may see: their own, or a public one.
    pub async fn find_visible(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Music>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM musics WHERE id = $1 AND (user_id = $2 OR is_public = true)"
        );
        sqlx::query_as::<_, Music>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the records among `ids` that `user_id` may see, in no
    /// particular order. Records made private by their owner drop out.
    pub async fn find_many_visible(
        pool: &PgPool,
        ids: &[DbId],
        user_id: DbId,
    ) -> Result<Vec<Music>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM musics \
             WHERE id = ANY($1) AND (user_id = $2 OR is_public = true)"
        );
        sqlx::query_as::<_, Music>(&query)
            .bind(ids)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List a user's records, newest first, optionally filtered by status.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<MusicStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Music>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM musics
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Music>(&query)
            .bind(user_id)
            .bind(status.map(MusicStatus::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a user's records under the same filter as [`Self::list_for_user`].
    pub async fn count_for_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<MusicStatus>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM musics
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR status = $2)",
        )
        .bind(user_id)
        .bind(status.map(MusicStatus::as_str))
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// All of a user's records created in `[start, end)`, newest first.
    pub async fn list_between(
        pool: &PgPool,
        user_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Music>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM musics
             WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Music>(&query)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// Lightweight status lookup for polling clients.
    pub async fn find_status(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<MusicStatusResponse>, sqlx::Error> {
        sqlx::query_as::<_, MusicStatusResponse>(
            "SELECT id, status, music_url, updated_at FROM musics WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Update user-editable fields. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateMusic,
    ) -> Result<Option<Music>, sqlx::Error> {
        let query = format!(
            "UPDATE musics SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                is_public = COALESCE($5, is_public)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Music>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned record. Collections, favorites, playlist items and
    /// generation logs cascade.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM musics WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment `play_count`, returning the new value.
    pub async fn increment_play_count(pool: &PgPool, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE musics SET play_count = play_count + 1 WHERE id = $1 RETURNING play_count",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(count,)| count))
    }

    /// Write the outcome of a pipeline run. Takes any executor so the
    /// pipeline can pair it with its log row in one transaction.
    ///
    /// Returns `false` if the record no longer exists (deleted while the
    /// pipeline was running).
    pub async fn apply_generation_result<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        result: &GenerationResult,
    ) -> Result<bool, sqlx::Error> {
        let outcome = sqlx::query(
            "UPDATE musics SET
                status = $2,
                music_url = COALESCE($3, music_url),
                file_size = COALESCE($4, file_size),
                emotion_tags = $5,
                ai_analysis = $6,
                genre = $7,
                bpm = $8,
                instruments = $9,
                input_content = COALESCE($10, input_content)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&result.status)
        .bind(&result.music_url)
        .bind(result.file_size)
        .bind(&result.emotion_tags)
        .bind(&result.ai_analysis)
        .bind(&result.genre)
        .bind(result.bpm)
        .bind(&result.instruments)
        .bind(&result.input_content)
        .execute(executor)
        .await?;
        Ok(outcome.rows_affected() > 0)
    }

    /// Flip a record to `failed`. Returns `false` if it no longer exists.
    pub async fn mark_failed<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let outcome = sqlx::query("UPDATE musics SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(MusicStatus::Failed.as_str())
            .execute(executor)
            .await?;
        Ok(outcome.rows_affected() > 0)
    }
}
