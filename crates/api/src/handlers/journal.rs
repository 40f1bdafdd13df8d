//! Journal and stats views over a user's music.

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use soundmood_core::journal::{group_by_day, resolve_date_range, JournalDay};
use soundmood_db::models::music::Music;
use soundmood_db::models::stats::UserStats;
use soundmood_db::repositories::{MusicRepo, StatsRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /music/journal`, both `YYYY-MM-DD`.
#[derive(Debug, Deserialize)]
pub struct JournalParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct JournalResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total: usize,
    pub days: Vec<JournalDay<Music>>,
}

/// GET /api/music/journal
///
/// Entries in `[from, to]` grouped by UTC day, newest day first. Days
/// without entries are omitted.
pub async fn get_journal(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<JournalParams>,
) -> AppResult<Json<DataResponse<JournalResponse>>> {
    let range = resolve_date_range(params.from, params.to)?;
    let musics = MusicRepo::list_between(&state.pool, auth.user_id, range.start, range.end).await?;

    let total = musics.len();
    let days = group_by_day(musics, |m| m.created_at);
    Ok(Json(DataResponse {
        data: JournalResponse {
            from: range.from,
            to: range.to,
            total,
            days,
        },
    }))
}

/// GET /api/music/stats
pub async fn get_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserStats>>> {
    let stats = StatsRepo::for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}
