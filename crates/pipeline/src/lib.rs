//! Background music generation.
//!
//! Turns a freshly inserted `generating` record into a finished track:
//! speech recognition for voice inputs, emotion analysis of the text or
//! image, music generation from the analysis prompt, and a generation log
//! with per-step timings. External services sit behind the traits in
//! [`analyzer`] and [`music_gen`] so tests can swap in fakes.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod music_gen;
pub mod openai;
pub mod orchestrator;

pub use analyzer::{EmotionAnalyzer, Transcriber};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use music_gen::{GeneratedTrack, HttpMusicGenerator, MusicGenerator, SimulatedMusicGenerator};
pub use openai::OpenAiClient;
pub use orchestrator::{GenerationJob, GenerationPipeline, JobInput};
