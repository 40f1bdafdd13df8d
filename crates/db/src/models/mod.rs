//! Row models and DTOs, one module per table.

pub mod collection;
pub mod favorite;
pub mod generation_log;
pub mod music;
pub mod playlist;
pub mod stats;
pub mod user;
pub mod user_settings;
