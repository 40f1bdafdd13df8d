//! Generation log: timings and raw model I/O of one pipeline run.

use serde::Serialize;
use soundmood_core::types::{DbId, Millis, Timestamp};
use sqlx::FromRow;

/// A row from the `generation_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenerationLog {
    pub id: DbId,
    pub music_id: DbId,
    pub asr_time: Millis,
    pub analysis_time: Millis,
    pub generation_time: Millis,
    pub total_time: Millis,
    pub asr_model: Option<String>,
    pub llm_model: Option<String>,
    pub music_model: Option<String>,
    pub raw_prompt: Option<String>,
    pub raw_response: Option<String>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a log row. Timings default to zero.
#[derive(Debug, Clone, Default)]
pub struct CreateGenerationLog {
    pub music_id: DbId,
    pub asr_time: Millis,
    pub analysis_time: Millis,
    pub generation_time: Millis,
    pub total_time: Millis,
    pub asr_model: Option<String>,
    pub llm_model: Option<String>,
    pub music_model: Option<String>,
    pub raw_prompt: Option<String>,
    pub raw_response: Option<String>,
    pub error_message: Option<String>,
}
