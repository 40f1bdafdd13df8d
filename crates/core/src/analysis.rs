//! Emotion analysis payload returned by the sentiment / vision model.
//!
//! The model is asked to answer with a bare JSON object. Replies are often
//! wrapped in a Markdown code fence, so [`parse_llm_content`] strips one
//! before deserializing. Missing fields fall back to the same defaults the
//! pipeline writes when no analysis is available at all.

use serde::{Deserialize, Serialize};

use crate::music::{InputType, DEFAULT_BPM};

/// Prompt used when the model reply carries no `music_prompt`.
pub const DEFAULT_MUSIC_PROMPT: &str = "peaceful ambient music";

/// Prompt of the canned fallback analysis.
pub const FALLBACK_MUSIC_PROMPT: &str =
    "calm peaceful ambient music with soft piano and gentle strings";

/// Structured result of analyzing a text or an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub mood: String,
    #[serde(default = "default_energy_level")]
    pub energy_level: String,
    #[serde(default)]
    pub suggested_genre: String,
    #[serde(default = "default_bpm")]
    pub suggested_bpm: i32,
    #[serde(default)]
    pub suggested_instruments: Vec<String>,
    #[serde(default = "default_music_prompt")]
    pub music_prompt: String,
    /// Only present for image inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_description: Option<String>,
}

fn default_energy_level() -> String {
    "medium".to_string()
}

fn default_bpm() -> i32 {
    DEFAULT_BPM
}

fn default_music_prompt() -> String {
    DEFAULT_MUSIC_PROMPT.to_string()
}

impl EmotionAnalysis {
    /// Canned analysis used whenever the model call fails or its reply
    /// cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            emotions: vec!["neutral".to_string(), "calm".to_string()],
            mood: "calm".to_string(),
            energy_level: "medium".to_string(),
            suggested_genre: "ambient".to_string(),
            suggested_bpm: 90,
            suggested_instruments: vec!["piano".to_string(), "strings".to_string()],
            music_prompt: FALLBACK_MUSIC_PROMPT.to_string(),
            image_description: None,
        }
    }

    /// Human-readable summary stored in `musics.ai_analysis`.
    ///
    /// Image inputs prefix the mood with the model's description of the
    /// picture.
    pub fn summary(&self, input_type: InputType) -> String {
        match input_type {
            InputType::Image => format!(
                "{} - {}",
                self.image_description.as_deref().unwrap_or_default(),
                self.mood
            ),
            InputType::Text | InputType::Voice => self.mood.clone(),
        }
    }
}

/// Remove a surrounding Markdown code fence (optionally tagged `json`).
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split("```").next().unwrap_or(rest);
    let body = body.strip_prefix("json").unwrap_or(body);
    body.trim()
}

/// Parse the content of a chat completion into an [`EmotionAnalysis`].
pub fn parse_llm_content(content: &str) -> Result<EmotionAnalysis, serde_json::Error> {
    serde_json::from_str(strip_code_fence(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let content = r#"{"emotions":["joy"],"mood":"bright","energy_level":"high",
            "suggested_genre":"pop","suggested_bpm":128,
            "suggested_instruments":["synth"],"music_prompt":"upbeat pop"}"#;
        let analysis = parse_llm_content(content).unwrap();
        assert_eq!(analysis.emotions, vec!["joy"]);
        assert_eq!(analysis.suggested_bpm, 128);
        assert_eq!(analysis.music_prompt, "upbeat pop");
        assert!(analysis.image_description.is_none());
    }

    #[test]
    fn strips_json_code_fence() {
        let content = "```json\n{\"mood\":\"wistful\"}\n```";
        let analysis = parse_llm_content(content).unwrap();
        assert_eq!(analysis.mood, "wistful");
    }

    #[test]
    fn strips_untagged_code_fence() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {} "), "{}");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let analysis = parse_llm_content("{}").unwrap();
        assert_eq!(analysis.suggested_bpm, DEFAULT_BPM);
        assert_eq!(analysis.music_prompt, DEFAULT_MUSIC_PROMPT);
        assert_eq!(analysis.energy_level, "medium");
        assert!(analysis.emotions.is_empty());
    }

    #[test]
    fn prose_reply_is_an_error() {
        assert!(parse_llm_content("I think the text is happy.").is_err());
    }

    #[test]
    fn image_summary_includes_description() {
        let mut analysis = EmotionAnalysis::fallback();
        analysis.image_description = Some("a foggy harbor".into());
        analysis.mood = "quiet".into();
        assert_eq!(analysis.summary(InputType::Image), "a foggy harbor - quiet");
        assert_eq!(analysis.summary(InputType::Text), "quiet");
    }

    #[test]
    fn fallback_is_calm_ambient() {
        let analysis = EmotionAnalysis::fallback();
        assert_eq!(analysis.suggested_genre, "ambient");
        assert_eq!(analysis.suggested_bpm, 90);
        assert_eq!(analysis.music_prompt, FALLBACK_MUSIC_PROMPT);
    }
}
