//! The background generation task.
//!
//! One [`GenerationJob`] per request, spawned onto the runtime and never
//! awaited by the handler. The job owns a pool handle, so it outlives the
//! request that created it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use soundmood_core::analysis::EmotionAnalysis;
use soundmood_core::music::{InputType, MusicStatus};
use soundmood_core::types::{DbId, Millis};
use soundmood_db::models::generation_log::CreateGenerationLog;
use soundmood_db::models::music::GenerationResult;
use soundmood_db::repositories::{GenerationLogRepo, MusicRepo};
use sqlx::PgPool;
use tokio::task::JoinHandle;

use crate::analyzer::{EmotionAnalyzer, Transcriber};
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::music_gen::{self, MusicGenerator};
use crate::openai::OpenAiClient;

/// Text analyzed when a voice recording yields no transcript.
pub const UNRECOGNIZED_VOICE_TEXT: &str =
    "Unrecognizable voice input; generate calm background music";

/// What the user submitted.
#[derive(Debug, Clone)]
pub enum JobInput {
    Text(String),
    /// Path of the stored audio upload.
    Voice(PathBuf),
    /// Path of the stored image upload.
    Image(PathBuf),
}

impl JobInput {
    pub fn input_type(&self) -> InputType {
        match self {
            JobInput::Text(_) => InputType::Text,
            JobInput::Voice(_) => InputType::Voice,
            JobInput::Image(_) => InputType::Image,
        }
    }
}

/// A generation request for an existing `generating` music record.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub music_id: DbId,
    pub input: JobInput,
    /// Target track length in seconds.
    pub duration: i32,
}

/// Runs generation jobs against a set of model clients.
pub struct GenerationPipeline {
    pool: PgPool,
    analyzer: Arc<dyn EmotionAnalyzer>,
    transcriber: Arc<dyn Transcriber>,
    generator: Arc<dyn MusicGenerator>,
}

/// Timings and intermediate values of a successful run.
struct RunOutcome {
    transcript: Option<String>,
    analysis: EmotionAnalysis,
    track: Option<music_gen::GeneratedTrack>,
    asr_time: Millis,
    analysis_time: Millis,
    generation_time: Millis,
}

fn millis(elapsed: Duration) -> Millis {
    Millis::try_from(elapsed.as_millis()).unwrap_or(Millis::MAX)
}

impl GenerationPipeline {
    pub fn new(
        pool: PgPool,
        analyzer: Arc<dyn EmotionAnalyzer>,
        transcriber: Arc<dyn Transcriber>,
        generator: Arc<dyn MusicGenerator>,
    ) -> Self {
        Self {
            pool,
            analyzer,
            transcriber,
            generator,
        }
    }

    /// Build the production pipeline: one OpenAI-compatible client for
    /// analysis and transcription, plus the configured music generator.
    pub fn from_config(pool: PgPool, config: &PipelineConfig) -> Self {
        let http = reqwest::Client::new();
        let openai = Arc::new(OpenAiClient::with_client(http.clone(), config));
        let generator: Arc<dyn MusicGenerator> = Arc::from(music_gen::from_config(http, config));

        tracing::info!(
            openai_configured = openai.is_configured(),
            music_model = generator.model(),
            "Generation pipeline ready",
        );

        Self::new(pool, openai.clone(), openai, generator)
    }

    /// Run `job` on a fresh task.
    pub fn spawn(self: &Arc<Self>, job: GenerationJob) -> JoinHandle<()> {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move { pipeline.run(job).await })
    }

    /// Run `job` to completion. Never fails: errors mark the record as
    /// `failed` and are recorded in a generation log. Voice recordings are
    /// deleted afterwards.
    pub async fn run(&self, job: GenerationJob) {
        let started = Instant::now();
        let music_id = job.music_id;
        let input_type = job.input.input_type();
        tracing::info!(music_id, input_type = %input_type, "Generation started");

        match self.execute(&job, started).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(music_id, "Music record disappeared during generation");
            }
            Err(e) => {
                tracing::error!(music_id, error = %e, "Generation failed");
                self.record_failure(music_id, &e, started).await;
            }
        }

        // The transcript replaces the recording as the record's input.
        if let JobInput::Voice(path) = &job.input {
            if let Err(e) = tokio::fs::remove_file(path).await {
                tracing::warn!(music_id, path = %path.display(), error = %e, "Failed to remove voice upload");
            }
        }
    }

    /// Returns `false` if the record was deleted while the job ran.
    async fn execute(&self, job: &GenerationJob, started: Instant) -> Result<bool, PipelineError> {
        let outcome = self.generate(job).await;
        let input_type = job.input.input_type();

        let status = if outcome.track.is_some() {
            MusicStatus::Completed
        } else {
            MusicStatus::Failed
        };
        let result = GenerationResult {
            status: status.as_str().to_string(),
            music_url: outcome.track.as_ref().map(|t| t.url.clone()),
            file_size: outcome.track.as_ref().map(|t| t.file_size),
            emotion_tags: outcome.analysis.emotions.clone(),
            ai_analysis: outcome.analysis.summary(input_type),
            genre: outcome.analysis.suggested_genre.clone(),
            bpm: outcome.analysis.suggested_bpm,
            instruments: outcome.analysis.suggested_instruments.clone(),
            input_content: outcome.transcript.clone(),
        };

        let llm_model = match input_type {
            InputType::Image => self.analyzer.vision_model(),
            InputType::Text | InputType::Voice => self.analyzer.text_model(),
        };
        let log = CreateGenerationLog {
            music_id: job.music_id,
            asr_time: outcome.asr_time,
            analysis_time: outcome.analysis_time,
            generation_time: outcome.generation_time,
            total_time: millis(started.elapsed()),
            asr_model: matches!(input_type, InputType::Voice)
                .then(|| self.transcriber.model().to_string()),
            llm_model: Some(llm_model.to_string()),
            music_model: Some(self.generator.model().to_string()),
            raw_prompt: Some(outcome.analysis.music_prompt.clone()),
            raw_response: Some(serde_json::to_string(&outcome.analysis)?),
            error_message: None,
        };

        // The result and its log land together or not at all.
        let mut tx = self.pool.begin().await?;
        if !MusicRepo::apply_generation_result(&mut *tx, job.music_id, &result).await? {
            return Ok(false);
        }
        GenerationLogRepo::create(&mut *tx, &log).await?;
        tx.commit().await?;

        tracing::info!(
            music_id = job.music_id,
            status = %status,
            asr_ms = outcome.asr_time,
            analysis_ms = outcome.analysis_time,
            generation_ms = outcome.generation_time,
            total_ms = log.total_time,
            "Generation finished",
        );
        Ok(true)
    }

    /// Transcription, analysis and generation. The model clients absorb
    /// their own failures, so this step cannot fail.
    async fn generate(&self, job: &GenerationJob) -> RunOutcome {
        let mut asr_time = 0;
        let mut transcript = None;

        let analysis_started;
        let analysis = match &job.input {
            JobInput::Text(text) => {
                analysis_started = Instant::now();
                self.analyzer.analyze_text(text).await
            }
            JobInput::Voice(path) => {
                let asr_started = Instant::now();
                let mut text = self.transcriber.transcribe(path).await;
                asr_time = millis(asr_started.elapsed());
                if text.trim().is_empty() {
                    tracing::debug!(music_id = job.music_id, "Empty transcript, using fallback text");
                    text = UNRECOGNIZED_VOICE_TEXT.to_string();
                }

                analysis_started = Instant::now();
                let analysis = self.analyzer.analyze_text(&text).await;
                transcript = Some(text);
                analysis
            }
            JobInput::Image(path) => {
                analysis_started = Instant::now();
                self.analyzer.analyze_image(path).await
            }
        };
        let analysis_time = millis(analysis_started.elapsed());

        let generation_started = Instant::now();
        let track = self
            .generator
            .generate(&analysis.music_prompt, job.duration)
            .await;
        let generation_time = millis(generation_started.elapsed());

        RunOutcome {
            transcript,
            analysis,
            track,
            asr_time,
            analysis_time,
            generation_time,
        }
    }

    async fn record_failure(&self, music_id: DbId, error: &PipelineError, started: Instant) {
        match MusicRepo::mark_failed(&self.pool, music_id).await {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                tracing::error!(music_id, error = %e, "Failed to mark music as failed");
                return;
            }
        }

        let log = CreateGenerationLog {
            music_id,
            total_time: millis(started.elapsed()),
            error_message: Some(error.to_string()),
            ..Default::default()
        };
        if let Err(e) = GenerationLogRepo::create(&self.pool, &log).await {
            tracing::error!(music_id, error = %e, "Failed to write failure log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_type_follows_variant() {
        assert_eq!(JobInput::Text("x".into()).input_type(), InputType::Text);
        assert_eq!(JobInput::Voice("a.mp3".into()).input_type(), InputType::Voice);
        assert_eq!(JobInput::Image("a.png".into()).input_type(), InputType::Image);
    }

    #[test]
    fn millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::from_secs(u64::MAX / 1000)), Millis::MAX);
    }
}
