//! Repository for the `generation_logs` table.

use soundmood_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::generation_log::{CreateGenerationLog, GenerationLog};

const COLUMNS: &str = "id, music_id, asr_time, analysis_time, generation_time, total_time, \
                       asr_model, llm_model, music_model, raw_prompt, raw_response, \
                       error_message, created_at, updated_at";

pub struct GenerationLogRepo;

impl GenerationLogRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateGenerationLog,
    ) -> Result<GenerationLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO generation_logs
                (music_id, asr_time, analysis_time, generation_time, total_time,
                 asr_model, llm_model, music_model, raw_prompt, raw_response, error_message)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationLog>(&query)
            .bind(input.music_id)
            .bind(input.asr_time)
            .bind(input.analysis_time)
            .bind(input.generation_time)
            .bind(input.total_time)
            .bind(&input.asr_model)
            .bind(&input.llm_model)
            .bind(&input.music_model)
            .bind(&input.raw_prompt)
            .bind(&input.raw_response)
            .bind(&input.error_message)
            .fetch_one(executor)
            .await
    }

    /// Logs for one music record, newest first.
    pub async fn list_by_music(
        pool: &PgPool,
        music_id: DbId,
    ) -> Result<Vec<GenerationLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generation_logs WHERE music_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, GenerationLog>(&query)
            .bind(music_id)
            .fetch_all(pool)
            .await
    }
}
