//! Music generation backends.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use soundmood_core::music::DEFAULT_MUSIC_FORMAT;
use soundmood_core::uploads::{public_url, stored_filename, MUSIC_SUBDIR};

use crate::config::PipelineConfig;
use crate::error::{ensure_success, PipelineError};

/// A track written to the upload tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTrack {
    /// Public URL, e.g. `/uploads/music/<uuid>.mp3`.
    pub url: String,
    pub file_size: i64,
    pub format: String,
}

/// Produces an audio file from a text prompt.
#[async_trait]
pub trait MusicGenerator: Send + Sync {
    /// Returns `None` when generation failed; the failure is logged by the
    /// implementation.
    async fn generate(&self, prompt: &str, duration: i32) -> Option<GeneratedTrack>;

    /// Model name recorded in generation logs.
    fn model(&self) -> &str;
}

/// Pick the generator for `config`: the HTTP service when `MUSIC_API_URL`
/// is set, the simulated one otherwise.
pub fn from_config(client: reqwest::Client, config: &PipelineConfig) -> Box<dyn MusicGenerator> {
    let music_dir = config.upload_dir.join(MUSIC_SUBDIR);
    match &config.music_api_url {
        Some(api_url) => Box::new(HttpMusicGenerator::with_client(
            client,
            api_url.clone(),
            config.music_api_key.clone(),
            music_dir,
            config.music_timeout,
        )),
        None => Box::new(SimulatedMusicGenerator::new(music_dir, config.simulated_delay)),
    }
}

async fn write_track(music_dir: &Path, bytes: &[u8]) -> Result<GeneratedTrack, PipelineError> {
    tokio::fs::create_dir_all(music_dir).await?;
    let filename = stored_filename("", DEFAULT_MUSIC_FORMAT);
    tokio::fs::write(music_dir.join(&filename), bytes).await?;
    Ok(GeneratedTrack {
        url: public_url(MUSIC_SUBDIR, &filename),
        file_size: bytes.len() as i64,
        format: DEFAULT_MUSIC_FORMAT.to_string(),
    })
}

// ---------------------------------------------------------------------------
// HTTP service
// ---------------------------------------------------------------------------

/// Client for an external generation service exposing `POST /generate`
/// that answers with raw audio bytes.
pub struct HttpMusicGenerator {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    music_dir: PathBuf,
    timeout: Duration,
}

impl HttpMusicGenerator {
    pub fn with_client(
        client: reqwest::Client,
        api_url: String,
        api_key: Option<String>,
        music_dir: PathBuf,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_url,
            api_key,
            music_dir,
            timeout,
        }
    }

    pub async fn try_generate(
        &self,
        prompt: &str,
        duration: i32,
    ) -> Result<GeneratedTrack, PipelineError> {
        let body = json!({
            "prompt": prompt,
            "duration": duration,
            "style": "auto",
        });

        let mut request = self
            .client
            .post(format!("{}/generate", self.api_url))
            .timeout(self.timeout)
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = ensure_success(request.send().await?).await?;
        let bytes = response.bytes().await?;
        write_track(&self.music_dir, &bytes).await
    }
}

#[async_trait]
impl MusicGenerator for HttpMusicGenerator {
    async fn generate(&self, prompt: &str, duration: i32) -> Option<GeneratedTrack> {
        match self.try_generate(prompt, duration).await {
            Ok(track) => Some(track),
            Err(e) => {
                tracing::warn!(error = %e, api_url = %self.api_url, "Music generation failed");
                None
            }
        }
    }

    fn model(&self) -> &str {
        "http"
    }
}

// ---------------------------------------------------------------------------
// Simulated
// ---------------------------------------------------------------------------

/// Development stand-in: writes an empty placeholder track after `delay`.
pub struct SimulatedMusicGenerator {
    music_dir: PathBuf,
    delay: Duration,
}

impl SimulatedMusicGenerator {
    pub fn new(music_dir: PathBuf, delay: Duration) -> Self {
        Self { music_dir, delay }
    }
}

#[async_trait]
impl MusicGenerator for SimulatedMusicGenerator {
    async fn generate(&self, prompt: &str, duration: i32) -> Option<GeneratedTrack> {
        let preview: String = prompt.chars().take(50).collect();
        tracing::info!(prompt = %preview, duration, "Simulating music generation");

        let track = match write_track(&self.music_dir, &[]).await {
            Ok(track) => track,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to write placeholder track");
                return None;
            }
        };
        tokio::time::sleep(self.delay).await;
        Some(track)
    }

    fn model(&self) -> &str {
        "simulated"
    }
}
