//! Data Transfer Objects

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::application::GeneratedStory;
use crate::domain::history::HistoryEntry;

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub version: &'static str,
}

/// 通用状态响应
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self { status: "success" }
    }
}

/// 生成结果
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub story: String,
    /// `data:audio/wav;base64,...`
    pub audio: String,
    pub history_item: HistoryEntry,
}

impl From<GeneratedStory> for GenerateResponse {
    fn from(result: GeneratedStory) -> Self {
        Self {
            audio: wav_data_uri(&result.wav),
            story: result.story,
            history_item: result.entry,
        }
    }
}

/// WAV 字节 → data URI
pub fn wav_data_uri(wav: &[u8]) -> String {
    format!("data:audio/wav;base64,{}", STANDARD.encode(wav))
}
