//! Aggregate queries for the per-user stats endpoint.

use soundmood_core::types::DbId;
use sqlx::PgPool;

use crate::models::stats::{EmotionCount, MusicCounters, UserStats};

/// Number of emotion tags reported in [`UserStats::top_emotions`].
pub const TOP_EMOTIONS: i64 = 5;

pub struct StatsRepo;

impl StatsRepo {
    pub async fn music_counters(pool: &PgPool, user_id: DbId) -> Result<MusicCounters, sqlx::Error> {
        sqlx::query_as::<_, MusicCounters>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'failed') AS failed,
                COUNT(*) FILTER (WHERE status = 'generating') AS generating,
                COUNT(*) FILTER (WHERE input_type = 'voice') AS voice,
                COUNT(*) FILTER (WHERE input_type = 'text') AS text,
                COUNT(*) FILTER (WHERE input_type = 'image') AS image,
                COUNT(*) FILTER (WHERE is_public) AS public,
                COALESCE(SUM(duration) FILTER (WHERE status = 'completed'), 0)::BIGINT AS total_duration,
                COALESCE(SUM(play_count), 0)::BIGINT AS total_plays
             FROM musics
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Most frequent emotion tags, ties broken alphabetically.
    pub async fn top_emotions(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<EmotionCount>, sqlx::Error> {
        sqlx::query_as::<_, EmotionCount>(
            "SELECT tag AS emotion, COUNT(*) AS count
             FROM musics, UNNEST(emotion_tags) AS tag
             WHERE user_id = $1
             GROUP BY tag
             ORDER BY count DESC, tag ASC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    async fn count_owned(pool: &PgPool, table: &str, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM {table} WHERE user_id = $1"))
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Assemble the full stats payload.
    pub async fn for_user(pool: &PgPool, user_id: DbId) -> Result<UserStats, sqlx::Error> {
        let music = Self::music_counters(pool, user_id).await?;
        let favorites = Self::count_owned(pool, "favorites", user_id).await?;
        let collections = Self::count_owned(pool, "collections", user_id).await?;
        let playlists = Self::count_owned(pool, "playlists", user_id).await?;
        let top_emotions = Self::top_emotions(pool, user_id, TOP_EMOTIONS).await?;

        Ok(UserStats {
            music,
            favorites,
            collections,
            playlists,
            top_emotions,
        })
    }
}
