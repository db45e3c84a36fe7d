//! Gemini Adapters
//!
//! 通过 Gemini REST API 实现 StoryModelPort 与 SpeechModelPort

mod client;
mod speech_model;
mod story_model;

pub use client::{GeminiClient, GeminiClientConfig, GEMINI_BASE_URL};
pub use speech_model::{GeminiSpeechModel, DEFAULT_TTS_MODEL};
pub use story_model::{GeminiStoryModel, DEFAULT_STORY_MODEL};
