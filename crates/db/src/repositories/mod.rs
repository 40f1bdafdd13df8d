//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Queries on user-owned rows
//! take the caller's `user_id` so ownership is enforced in SQL.

pub mod collection_repo;
pub mod favorite_repo;
pub mod generation_log_repo;
pub mod music_repo;
pub mod playlist_repo;
pub mod stats_repo;
pub mod user_repo;
pub mod user_settings_repo;

pub use collection_repo::CollectionRepo;
pub use favorite_repo::FavoriteRepo;
pub use generation_log_repo::GenerationLogRepo;
pub use music_repo::MusicRepo;
pub use playlist_repo::PlaylistRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
pub use user_settings_repo::UserSettingsRepo;
