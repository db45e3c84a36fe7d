//! Gemini REST Client - generateContent 调用与报文结构
//!
//! POST {base_url}/models/{model}:generateContent?key={api_key}

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::ModelError;

/// Gemini API 默认地址
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API Key，为空时首次调用返回 `MissingApiKey`
    pub api_key: String,
    /// API 基础 URL
    pub base_url: String,
    /// 请求超时时间（秒），0 表示不限制
    pub timeout_secs: u64,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: GEMINI_BASE_URL.to_string(),
            timeout_secs: 300,
        }
    }
}

impl GeminiClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InlineData {
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    /// base64 编码
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerationConfig {
    pub response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// 第一个候选的所有 part
    pub fn first_candidate_parts(&self) -> Result<&[Part], ModelError> {
        let candidate = self.candidates.first().ok_or_else(|| {
            let reason = self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
                .unwrap_or("no candidates");
            ModelError::InvalidResponse(format!("empty response ({})", reason))
        })?;

        match &candidate.content {
            Some(content) => Ok(&content.parts),
            None => Err(ModelError::InvalidResponse(format!(
                "candidate has no content (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    code: u16,
    message: String,
}

// ============================================================================
// GeminiClient
// ============================================================================

/// Gemini generateContent 客户端
///
/// 故事模型与语音模型共用；不做重试，错误直接上抛。
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiClientConfig) -> Result<Self, ModelError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ModelError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn has_api_key(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn generate_url(&self, model: &str) -> String {
        let model = model.trim_start_matches("models/");
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    pub(super) async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ModelError> {
        if !self.has_api_key() {
            return Err(ModelError::MissingApiKey);
        }

        let url = self.generate_url(model);

        tracing::debug!(url = %url, model = %model, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout
                } else if e.is_connect() {
                    ModelError::Network(format!("Cannot connect to Gemini API: {}", e.without_url()))
                } else {
                    ModelError::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let error_detail = serde_json::from_str::<GeminiErrorResponse>(&error_body)
                .ok()
                .and_then(|e| e.error);

            let (code, message) = error_detail
                .map(|e| (e.code, e.message))
                .unwrap_or((status.as_u16(), error_body));

            tracing::error!(code = code, model = %model, message = %message, "Gemini API error");

            return Err(ModelError::Api { code, message });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to decode response: {}", e)))
    }
}
