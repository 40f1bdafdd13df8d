//! Client for an OpenAI-compatible API.
//!
//! Uses `/chat/completions` for text and image analysis and
//! `/audio/transcriptions` for speech recognition. The `try_*` methods
//! surface every failure; the trait implementations log it and degrade to
//! the fallback analysis or an empty transcript.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};
use soundmood_core::analysis::{parse_llm_content, EmotionAnalysis};
use soundmood_core::uploads::{audio_media_type, extract_extension, image_media_type};

use crate::analyzer::{EmotionAnalyzer, Transcriber};
use crate::config::PipelineConfig;
use crate::error::{ensure_success, PipelineError};

const SYSTEM_PROMPT: &str = "You are an expert in emotion analysis and music recommendation. \
                             Reply with JSON only, without any other text.";

const TEXT_TEMPERATURE: f64 = 0.7;
const VISION_MAX_TOKENS: u32 = 1000;

/// HTTP client for the analysis and transcription models.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    text_model: String,
    vision_model: String,
    asr_model: String,
    text_timeout: Duration,
    media_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

impl OpenAiClient {
    pub fn new(config: &PipelineConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &PipelineConfig) -> Self {
        Self {
            client,
            base_url: config.openai_base_url.clone(),
            api_key: config.openai_api_key.clone(),
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
            asr_model: config.asr_model.clone(),
            text_timeout: config.text_timeout,
            media_timeout: config.media_timeout,
        }
    }

    /// Whether an API key is configured. Without one no request is sent.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Analyze `text` with the chat model.
    pub async fn try_analyze_text(&self, text: &str) -> Result<EmotionAnalysis, PipelineError> {
        let body = text_request_body(&self.text_model, text);
        let content = self.chat(&body, self.text_timeout).await?;
        Ok(parse_llm_content(&content)?)
    }

    /// Analyze the image at `path` with the vision model.
    pub async fn try_analyze_image(&self, path: &Path) -> Result<EmotionAnalysis, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        let ext = extension_of(path);
        let data_url = format!(
            "data:{};base64,{}",
            image_media_type(&ext),
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );
        let body = image_request_body(&self.vision_model, &data_url);
        let content = self.chat(&body, self.media_timeout).await?;
        Ok(parse_llm_content(&content)?)
    }

    /// Transcribe the audio file at `path`.
    pub async fn try_transcribe(&self, path: &Path) -> Result<String, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".to_string());
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(audio_media_type(&extension_of(path)))?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.asr_model.clone())
            .part("file", part);

        let response = self
            .authorized(self.client.post(format!("{}/audio/transcriptions", self.base_url)))
            .timeout(self.media_timeout)
            .multipart(form)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let parsed: TranscriptionResponse = response.json().await?;
        Ok(parsed.text.trim().to_string())
    }

    // ---- private helpers ----

    /// Send a chat completion request and return the first choice's content.
    async fn chat(&self, body: &Value, timeout: Duration) -> Result<String, PipelineError> {
        let response = self
            .authorized(self.client.post(format!("{}/chat/completions", self.base_url)))
            .timeout(timeout)
            .json(body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let parsed: ChatResponse = response.json().await?;
        Ok(first_choice_content(parsed))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

#[async_trait]
impl EmotionAnalyzer for OpenAiClient {
    async fn analyze_text(&self, text: &str) -> EmotionAnalysis {
        if !self.is_configured() {
            tracing::debug!("No OpenAI API key configured, using fallback analysis");
            return EmotionAnalysis::fallback();
        }
        match self.try_analyze_text(text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, model = %self.text_model, "Text analysis failed, using fallback");
                EmotionAnalysis::fallback()
            }
        }
    }

    async fn analyze_image(&self, path: &Path) -> EmotionAnalysis {
        if !self.is_configured() {
            tracing::debug!("No OpenAI API key configured, using fallback analysis");
            return EmotionAnalysis::fallback();
        }
        match self.try_analyze_image(path).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, model = %self.vision_model, "Image analysis failed, using fallback");
                EmotionAnalysis::fallback()
            }
        }
    }

    fn text_model(&self) -> &str {
        &self.text_model
    }

    fn vision_model(&self) -> &str {
        &self.vision_model
    }
}

#[async_trait]
impl Transcriber for OpenAiClient {
    async fn transcribe(&self, path: &Path) -> String {
        if !self.is_configured() {
            tracing::debug!("No OpenAI API key configured, skipping transcription");
            return String::new();
        }
        match self.try_transcribe(path).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, model = %self.asr_model, "Transcription failed");
                String::new()
            }
        }
    }

    fn model(&self) -> &str {
        &self.asr_model
    }
}

fn extension_of(path: &Path) -> String {
    path.to_str()
        .and_then(extract_extension)
        .unwrap_or_default()
}

fn first_choice_content(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

fn text_request_body(model: &str, text: &str) -> Value {
    let prompt = format!(
        "Analyze the emotions in the following text and suggest fitting music parameters.\n\n\
         Text:\n{text}\n\n\
         Reply in JSON (nothing else):\n\
         {{\n\
         \x20   \"emotions\": [\"primary emotion 1\", \"primary emotion 2\"],\n\
         \x20   \"mood\": \"overall mood\",\n\
         \x20   \"energy_level\": \"high/medium/low\",\n\
         \x20   \"suggested_genre\": \"suggested music genre\",\n\
         \x20   \"suggested_bpm\": 120,\n\
         \x20   \"suggested_instruments\": [\"instrument 1\", \"instrument 2\"],\n\
         \x20   \"music_prompt\": \"English prompt for an AI music generator\"\n\
         }}"
    );
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": prompt },
        ],
        "temperature": TEXT_TEMPERATURE,
    })
}

fn image_request_body(model: &str, data_url: &str) -> Value {
    let prompt = "Analyze the emotion and atmosphere of this image and suggest fitting music parameters.\n\n\
                  Reply in JSON (nothing else):\n\
                  {\n\
                  \x20   \"image_description\": \"what the image shows\",\n\
                  \x20   \"emotions\": [\"primary emotion 1\", \"primary emotion 2\"],\n\
                  \x20   \"mood\": \"overall atmosphere\",\n\
                  \x20   \"energy_level\": \"high/medium/low\",\n\
                  \x20   \"suggested_genre\": \"suggested music genre\",\n\
                  \x20   \"suggested_bpm\": 120,\n\
                  \x20   \"suggested_instruments\": [\"instrument 1\", \"instrument 2\"],\n\
                  \x20   \"music_prompt\": \"English prompt for an AI music generator\"\n\
                  }";
    json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": prompt },
                { "type": "image_url", "image_url": { "url": data_url } },
            ],
        }],
        "max_tokens": VISION_MAX_TOKENS,
    })
}
