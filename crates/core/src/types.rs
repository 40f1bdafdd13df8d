//! Primitive aliases shared by every crate in the workspace.

/// Primary keys of every SoundMood table (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Durations recorded in generation logs are whole milliseconds.
pub type Millis = i32;
