//! Repository for the `user_settings` table.

use soundmood_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_settings::{UpdateUserSettings, UserSettings};

const COLUMNS: &str = "id, user_id, preferred_language, theme_preference, default_duration, \
                       default_genre, notify_on_complete, public_profile, created_at, updated_at";

pub struct UserSettingsRepo;

impl UserSettingsRepo {
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_settings WHERE user_id = $1");
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the settings row, creating it with defaults if missing.
    ///
    /// Safe against concurrent first access: the insert is a no-op when a
    /// row appeared in the meantime.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<UserSettings, sqlx::Error> {
        if let Some(settings) = Self::find_by_user(pool, user_id).await? {
            return Ok(settings);
        }
        sqlx::query("INSERT INTO user_settings (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;
        let query = format!("SELECT {COLUMNS} FROM user_settings WHERE user_id = $1");
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update, creating the row first if needed.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateUserSettings,
    ) -> Result<UserSettings, sqlx::Error> {
        Self::get_or_create(pool, user_id).await?;
        let query = format!(
            "UPDATE user_settings SET
                preferred_language = COALESCE($2, preferred_language),
                theme_preference = COALESCE($3, theme_preference),
                default_duration = COALESCE($4, default_duration),
                default_genre = COALESCE($5, default_genre),
                notify_on_complete = COALESCE($6, notify_on_complete),
                public_profile = COALESCE($7, public_profile)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .bind(&input.preferred_language)
            .bind(&input.theme_preference)
            .bind(input.default_duration)
            .bind(&input.default_genre)
            .bind(input.notify_on_complete)
            .bind(input.public_profile)
            .fetch_one(pool)
            .await
    }
}
