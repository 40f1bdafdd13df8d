//! Journal view: music records bucketed by calendar day (UTC).

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Days covered when the client does not give a `from` date.
pub const DEFAULT_RANGE_DAYS: i64 = 30;
/// Widest range a single journal request may cover.
pub const MAX_RANGE_DAYS: i64 = 366;
/// Calendar years a journal date may fall in.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// All entries created on one day.
#[derive(Debug, Clone, Serialize)]
pub struct JournalDay<T> {
    pub date: NaiveDate,
    pub count: usize,
    pub entries: Vec<T>,
}

/// Half-open UTC interval `[start, end)` resolved from optional dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Resolve `?from=&to=` into a bounded range.
///
/// `to` defaults to today, `from` to [`DEFAULT_RANGE_DAYS`] days ending at
/// `to` (inclusive).
pub fn resolve_date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<DateRange, CoreError> {
    let to = supported(to.unwrap_or_else(|| Utc::now().date_naive()))?;
    let from = match from {
        Some(from) => supported(from)?,
        None => to
            .checked_sub_signed(Duration::days(DEFAULT_RANGE_DAYS - 1))
            .ok_or_else(out_of_range)?,
    };

    if from > to {
        return Err(CoreError::Validation(
            "'from' must not be later than 'to'".into(),
        ));
    }
    if (to - from).num_days() + 1 > MAX_RANGE_DAYS {
        return Err(CoreError::Validation(format!(
            "Journal range must not exceed {MAX_RANGE_DAYS} days"
        )));
    }

    let start = from.and_time(NaiveTime::MIN).and_utc();
    let end = to.succ_opt().ok_or_else(out_of_range)?.and_time(NaiveTime::MIN).and_utc();
    Ok(DateRange { from, to, start, end })
}

fn supported(date: NaiveDate) -> Result<NaiveDate, CoreError> {
    if SUPPORTED_YEARS.contains(&date.year()) {
        Ok(date)
    } else {
        Err(out_of_range())
    }
}

fn out_of_range() -> CoreError {
    CoreError::Validation(format!(
        "Journal dates must fall within years {}..={}",
        SUPPORTED_YEARS.start(),
        SUPPORTED_YEARS.end()
    ))
}

/// Group `items` by the UTC date of `created_at`, newest day first.
///
/// The relative order of entries within a day is preserved.
pub fn group_by_day<T>(items: Vec<T>, created_at: impl Fn(&T) -> Timestamp) -> Vec<JournalDay<T>> {
    let mut days: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for item in items {
        days.entry(created_at(&item).date_naive()).or_default().push(item);
    }
    days.into_iter()
        .rev()
        .map(|(date, entries)| JournalDay {
            date,
            count: entries.len(),
            entries,
        })
        .collect()
}
