use std::path::PathBuf;
use std::time::Duration;

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Model and service configuration for the generation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// API key for the OpenAI-compatible endpoint. Without one, analysis
    /// and transcription are skipped and fall back to canned results.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    /// Chat model used for text analysis.
    pub text_model: String,
    /// Multimodal chat model used for image analysis.
    pub vision_model: String,
    /// Speech-to-text model.
    pub asr_model: String,
    /// Base URL of a music generation service. `None` selects the
    /// simulated generator.
    pub music_api_url: Option<String>,
    pub music_api_key: Option<String>,
    /// Root of the upload tree; generated tracks land in `<upload_dir>/music`.
    pub upload_dir: PathBuf,
    /// Artificial latency of the simulated generator.
    pub simulated_delay: Duration,
    /// Timeout for text analysis requests.
    pub text_timeout: Duration,
    /// Timeout for image analysis and transcription requests.
    pub media_timeout: Duration,
    /// Timeout for music generation requests.
    pub music_timeout: Duration,
}

impl PipelineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `OPENAI_API_KEY`       | unset                       |
    /// | `OPENAI_BASE_URL`      | `https://api.openai.com/v1` |
    /// | `TEXT_MODEL`           | `gpt-3.5-turbo`             |
    /// | `VISION_MODEL`         | `gpt-4o-mini`               |
    /// | `ASR_MODEL`            | `whisper-1`                 |
    /// | `MUSIC_API_URL`        | unset (simulated)           |
    /// | `MUSIC_API_KEY`        | unset                       |
    /// | `UPLOAD_DIR`           | `uploads`                   |
    /// | `SIMULATED_DELAY_SECS` | `3`                         |
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let simulated_delay_secs: u64 = std::env::var("SIMULATED_DELAY_SECS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("SIMULATED_DELAY_SECS must be a valid u64");

        Self {
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_base_url: non_empty("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into())
                .trim_end_matches('/')
                .to_string(),
            text_model: non_empty("TEXT_MODEL").unwrap_or_else(|| "gpt-3.5-turbo".into()),
            vision_model: non_empty("VISION_MODEL").unwrap_or_else(|| "gpt-4o-mini".into()),
            asr_model: non_empty("ASR_MODEL").unwrap_or_else(|| "whisper-1".into()),
            music_api_url: non_empty("MUSIC_API_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            music_api_key: non_empty("MUSIC_API_KEY"),
            upload_dir: PathBuf::from(
                std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
            ),
            simulated_delay: Duration::from_secs(simulated_delay_secs),
            ..Self::default()
        }
    }
}

impl Default for PipelineConfig {
    /// Offline configuration: no API key and an instant simulated generator.
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.into(),
            text_model: "gpt-3.5-turbo".into(),
            vision_model: "gpt-4o-mini".into(),
            asr_model: "whisper-1".into(),
            music_api_url: None,
            music_api_key: None,
            upload_dir: PathBuf::from("uploads"),
            simulated_delay: Duration::ZERO,
            text_timeout: Duration::from_secs(30),
            media_timeout: Duration::from_secs(60),
            music_timeout: Duration::from_secs(120),
        }
    }
}
