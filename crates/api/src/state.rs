use std::sync::Arc;

use soundmood_pipeline::GenerationPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: soundmood_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Background music generation, spawned once per generate request.
    pub pipeline: Arc<GenerationPipeline>,
}
