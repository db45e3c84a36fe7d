//! Generate HTTP Handler
//!
//! POST /api/generate（multipart）:
//! - files: 一个或多个图片
//! - style / voice / language: 文本，可选
//! - custom_prompt: 文本，可选

use axum::{
    extract::{ConnectInfo, Multipart, State},
    Json,
};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::{ApplicationError, GenerateStory};
use crate::domain::story::{ImagePart, StoryOptions};
use crate::infrastructure::http::dto::GenerateResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 解析后的表单
#[derive(Debug, Default)]
struct GenerateForm {
    images: Vec<ImagePart>,
    style: Option<String>,
    voice: Option<String>,
    language: Option<String>,
    custom_prompt: Option<String>,
}

impl GenerateForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = GenerateForm::default();

        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                "files" => {
                    let content_type = field.content_type().map(|s| s.to_string());
                    let data = field.bytes().await?;
                    form.images.push(ImagePart::new(content_type.as_deref(), data));
                }
                "style" => form.style = Some(field.text().await?),
                "voice" => form.voice = Some(field.text().await?),
                "language" => form.language = Some(field.text().await?),
                "custom_prompt" => form.custom_prompt = Some(field.text().await?),
                other => {
                    tracing::debug!(field = %other, "Ignoring unknown multipart field");
                }
            }
        }

        Ok(form)
    }

    fn into_command(self) -> GenerateStory {
        GenerateStory {
            images: self.images,
            options: StoryOptions::from_fields(
                self.style,
                self.voice,
                self.language,
                self.custom_prompt,
            ),
        }
    }
}

/// 生成有声故事
///
/// 限流检查在读取请求体之前完成。
pub async fn generate(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, ApiError> {
    state
        .rate_limiter
        .check(peer.ip())
        .map_err(ApplicationError::from)?;

    let command = GenerateForm::read(multipart).await?.into_command();

    tracing::info!(
        client = %peer.ip(),
        files = command.images.len(),
        "Received generate request"
    );

    let result = state.generate_story_handler.handle(command).await?;

    Ok(Json(GenerateResponse::from(result)))
}
