//! Gemini Speech Model - 文本转语音
//!
//! 实现 SpeechModelPort：请求仅音频输出，响应必须恰好包含一个内联音频 part。
//! 返回的是裸 PCM（当前为 16 位 / 单声道 / 24kHz），不同模型版本可能变化。

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::client::{
    Content, GenerateContentRequest, GenerationConfig, GeminiClient, Part, PrebuiltVoiceConfig,
    SpeechConfig, VoiceConfig,
};
use crate::application::ports::{ModelError, SpeechAudio, SpeechModelPort, SpeechRequest};

/// 默认语音模型
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Gemini 语音模型
pub struct GeminiSpeechModel {
    client: GeminiClient,
    model: String,
}

impl GeminiSpeechModel {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn build_request(request: SpeechRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(request.text)],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: request.voice,
                        },
                    },
                }),
            }),
        }
    }
}

#[async_trait]
impl SpeechModelPort for GeminiSpeechModel {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, ModelError> {
        let voice = request.voice.clone();
        let body = Self::build_request(request);

        let response = self.client.generate_content(&self.model, &body).await?;
        let parts = response.first_candidate_parts()?;

        let inline = match parts {
            [part] => part.inline_data.as_ref().ok_or_else(|| {
                ModelError::InvalidResponse("speech response part has no inline audio".to_string())
            })?,
            _ => {
                return Err(ModelError::InvalidResponse(format!(
                    "expected exactly one audio part, got {}",
                    parts.len()
                )))
            }
        };

        if !inline.mime_type.starts_with("audio/") {
            return Err(ModelError::InvalidResponse(format!(
                "speech response is not audio: {}",
                inline.mime_type
            )));
        }

        let pcm = STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| ModelError::InvalidResponse(format!("invalid base64 audio: {}", e)))?;

        tracing::debug!(
            model = %self.model,
            voice = %voice,
            mime_type = %inline.mime_type,
            audio_size = pcm.len(),
            "Gemini speech synthesized"
        );

        Ok(SpeechAudio {
            pcm,
            mime_type: Some(inline.mime_type.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::gemini::GeminiClientConfig;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn model(server: &MockServer) -> GeminiSpeechModel {
        let client = GeminiClient::new(
            GeminiClientConfig::new("test-key").with_base_url(server.uri()),
        )
        .unwrap();
        GeminiSpeechModel::new(client, DEFAULT_TTS_MODEL)
    }

    fn speech_request() -> SpeechRequest {
        SpeechRequest {
            text: "Once upon a time.".to_string(),
            voice: "Aoede".to_string(),
        }
    }

    async fn respond_with(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash-preview-tts:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_synthesize_requests_audio_with_voice() {
        let server = MockServer::start().await;
        let pcm = vec![0u8, 1, 2, 3];
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": "Once upon a time." }] }],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": { "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Aoede" } } }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{
                        "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": STANDARD.encode(&pcm) }
                    }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let audio = model(&server).synthesize(speech_request()).await.unwrap();
        assert_eq!(audio.pcm, pcm);
        assert_eq!(audio.declared_sample_rate(), Some(24000));
    }

    #[tokio::test]
    async fn test_missing_audio_part_is_invalid() {
        let server = MockServer::start().await;
        respond_with(
            &server,
            serde_json::json!({ "candidates": [{ "content": { "parts": [] } }] }),
        )
        .await;

        let result = model(&server).synthesize(speech_request()).await;
        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_multiple_parts_are_invalid() {
        let server = MockServer::start().await;
        let part = serde_json::json!({ "inlineData": { "mimeType": "audio/L16", "data": "AAAA" } });
        respond_with(
            &server,
            serde_json::json!({ "candidates": [{ "content": { "parts": [part.clone(), part] } }] }),
        )
        .await;

        let result = model(&server).synthesize(speech_request()).await;
        match result {
            Err(ModelError::InvalidResponse(msg)) => assert!(msg.contains("got 2")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_text_only_part_is_invalid() {
        let server = MockServer::start().await;
        respond_with(
            &server,
            serde_json::json!({ "candidates": [{ "content": { "parts": [{ "text": "sorry" }] } }] }),
        )
        .await;

        let result = model(&server).synthesize(speech_request()).await;
        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_non_audio_inline_data_is_invalid() {
        let server = MockServer::start().await;
        respond_with(
            &server,
            serde_json::json!({ "candidates": [{ "content": { "parts": [{
                "inlineData": { "mimeType": "image/png", "data": "AAAA" }
            }] } }] }),
        )
        .await;

        let result = model(&server).synthesize(speech_request()).await;
        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }
}
