//! Model-facing seams of the pipeline.

use std::path::Path;

use async_trait::async_trait;
use soundmood_core::analysis::EmotionAnalysis;

/// Derives music parameters from a text or an image.
///
/// Implementations never fail: when the model is unreachable or answers
/// with garbage they return [`EmotionAnalysis::fallback`].
#[async_trait]
pub trait EmotionAnalyzer: Send + Sync {
    async fn analyze_text(&self, text: &str) -> EmotionAnalysis;

    async fn analyze_image(&self, path: &Path) -> EmotionAnalysis;

    /// Model name recorded in generation logs for text analysis.
    fn text_model(&self) -> &str;

    /// Model name recorded in generation logs for image analysis.
    fn vision_model(&self) -> &str;
}

/// Speech-to-text. Returns an empty string when nothing was recognized or
/// the service failed.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, path: &Path) -> String;

    fn model(&self) -> &str;
}
