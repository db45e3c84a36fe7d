//! Model Ports - 外部生成模型抽象
//!
//! 故事生成与语音合成都委托给外部模型服务，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::story::ImagePart;

/// 外部模型调用错误
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 故事生成请求
#[derive(Debug, Clone)]
pub struct StoryRequest {
    pub prompt: String,
    /// 按上传顺序排列的图片
    pub images: Vec<ImagePart>,
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    /// 预置音色名
    pub voice: String,
}

/// 语音合成结果
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    /// 原始 PCM 字节
    pub pcm: Vec<u8>,
    /// 服务端声明的 MIME，例如 `audio/L16;codec=pcm;rate=24000`
    pub mime_type: Option<String>,
}

impl SpeechAudio {
    /// 从 MIME 参数中读取采样率
    pub fn declared_sample_rate(&self) -> Option<u32> {
        self.mime_type.as_deref()?.split(';').find_map(|param| {
            let (key, value) = param.trim().split_once('=')?;
            if key.eq_ignore_ascii_case("rate") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
    }
}

/// Story Model Port
///
/// 多模态文本生成：提示词 + 图片 → 故事文本
#[async_trait]
pub trait StoryModelPort: Send + Sync {
    async fn write_story(&self, request: StoryRequest) -> Result<String, ModelError>;
}

/// Speech Model Port
///
/// 文本 → 单段裸 PCM 音频
#[async_trait]
pub trait SpeechModelPort: Send + Sync {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, ModelError>;
}
