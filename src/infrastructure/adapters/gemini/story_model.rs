//! Gemini Story Model - 多模态故事生成
//!
//! 实现 StoryModelPort：提示词 + 全部图片作为一次请求的多个 part

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::client::{Content, GenerateContentRequest, GeminiClient, Part};
use crate::application::ports::{ModelError, StoryModelPort, StoryRequest};

/// 默认故事模型
pub const DEFAULT_STORY_MODEL: &str = "gemini-2.5-flash";

/// Gemini 故事模型
pub struct GeminiStoryModel {
    client: GeminiClient,
    model: String,
}

impl GeminiStoryModel {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn build_request(request: StoryRequest) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(request.images.len() + 1);
        parts.push(Part::text(request.prompt));
        parts.extend(
            request
                .images
                .into_iter()
                .map(|image| Part::inline(image.mime_type, STANDARD.encode(&image.data))),
        );

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: None,
        }
    }
}

#[async_trait]
impl StoryModelPort for GeminiStoryModel {
    async fn write_story(&self, request: StoryRequest) -> Result<String, ModelError> {
        let images = request.images.len();
        let body = Self::build_request(request);

        let response = self.client.generate_content(&self.model, &body).await?;

        let story: String = response
            .first_candidate_parts()?
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if story.trim().is_empty() {
            return Err(ModelError::InvalidResponse(
                "story response contains no text".to_string(),
            ));
        }

        tracing::debug!(
            model = %self.model,
            images = images,
            story_len = story.len(),
            "Gemini story generated"
        );

        Ok(story)
    }
}
