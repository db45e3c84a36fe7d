//! Generate Command Handler - 图片 → 故事 → 语音 → 历史
//!
//! 流程：校验 → 故事模型 → 语音模型 → WAV 封装 → 写入历史。
//! 任一步失败即中止；写入历史之前的失败不会留下任何文件。

use chrono::{Local, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::application::commands::GenerateStory;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    HistoryStorePort, SpeechModelPort, SpeechRequest, StoryModelPort, StoryRequest,
};
use crate::domain::audio::{encode_wav, PcmFormat};
use crate::domain::history::{HistoryEntry, HistoryId};
use crate::domain::story::build_story_prompt;

/// 上传限制
#[derive(Debug, Clone, Copy)]
pub struct GenerateLimits {
    /// 单次请求最多图片数
    pub max_images: usize,
    /// 单张图片最大字节数
    pub max_image_bytes: usize,
}

impl Default for GenerateLimits {
    fn default() -> Self {
        Self {
            max_images: 10,
            max_image_bytes: 10 * 1024 * 1024, // 10 MB
        }
    }
}

/// 生成结果
#[derive(Debug, Clone)]
pub struct GeneratedStory {
    pub story: String,
    /// 完整 WAV 文件字节
    pub wav: Vec<u8>,
    pub entry: HistoryEntry,
}

/// 历史 ID 分配器
///
/// 以毫秒时间戳为 ID，同一进程内严格递增，同一毫秒内的并发请求不会得到相同 ID。
#[derive(Debug, Default)]
pub struct HistoryIdClock {
    last: AtomicI64,
}

impl HistoryIdClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> HistoryId {
        self.next_after(Utc::now().timestamp_millis())
    }

    fn next_after(&self, now_ms: i64) -> HistoryId {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_ms.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        HistoryId::new(now_ms.max(previous + 1))
    }
}

/// GenerateStory Handler
pub struct GenerateStoryHandler {
    story_model: Arc<dyn StoryModelPort>,
    speech_model: Arc<dyn SpeechModelPort>,
    history_store: Arc<dyn HistoryStorePort>,
    /// 静态音频目录的公开地址
    audio_base_url: String,
    limits: GenerateLimits,
    ids: HistoryIdClock,
}

impl GenerateStoryHandler {
    pub fn new(
        story_model: Arc<dyn StoryModelPort>,
        speech_model: Arc<dyn SpeechModelPort>,
        history_store: Arc<dyn HistoryStorePort>,
        audio_base_url: impl Into<String>,
        limits: GenerateLimits,
    ) -> Self {
        Self {
            story_model,
            speech_model,
            history_store,
            audio_base_url: audio_base_url.into(),
            limits,
            ids: HistoryIdClock::new(),
        }
    }

    pub async fn handle(&self, command: GenerateStory) -> Result<GeneratedStory, ApplicationError> {
        self.validate(&command)?;

        let GenerateStory { images, options } = command;

        tracing::info!(
            images = images.len(),
            style = %options.style,
            voice = %options.voice,
            language = %options.language,
            "Generating story"
        );

        // 1. 故事
        let prompt = build_story_prompt(&options);
        let story = self
            .story_model
            .write_story(StoryRequest { prompt, images })
            .await?;
        let story = story.trim().to_string();
        if story.is_empty() {
            return Err(ApplicationError::upstream_format(
                "story model returned no text",
            ));
        }

        tracing::info!(story_chars = story.chars().count(), "Story generated");

        // 2. 语音
        let speech = self
            .speech_model
            .synthesize(SpeechRequest {
                text: story.clone(),
                voice: options.voice.clone(),
            })
            .await?;

        let format = PcmFormat::GEMINI_TTS;
        if let Some(rate) = speech.declared_sample_rate() {
            if rate != format.sample_rate {
                tracing::warn!(
                    declared_rate = rate,
                    assumed_rate = format.sample_rate,
                    mime_type = ?speech.mime_type,
                    "Speech model declared an unexpected sample rate"
                );
            }
        }
        if speech.pcm.is_empty() {
            tracing::warn!("Speech model returned an empty audio part");
        }

        // 3. WAV 封装
        let wav = encode_wav(&speech.pcm, format);

        tracing::info!(
            pcm_bytes = speech.pcm.len(),
            duration_ms = format.duration_ms(speech.pcm.len()),
            "Audio synthesized"
        );

        // 4. 写入历史
        let id = self.ids.next();
        let entry = HistoryEntry::new(
            id,
            Local::now().date_naive(),
            story.clone(),
            &self.audio_base_url,
            &options,
        );
        self.history_store.append(&entry, &wav).await?;

        tracing::info!(history_id = %id, "Generation saved to history");

        Ok(GeneratedStory { story, wav, entry })
    }

    fn validate(&self, command: &GenerateStory) -> Result<(), ApplicationError> {
        if command.images.is_empty() {
            return Err(ApplicationError::validation("At least one image is required"));
        }
        if command.images.len() > self.limits.max_images {
            return Err(ApplicationError::validation(format!(
                "Too many images: {} (max {})",
                command.images.len(),
                self.limits.max_images
            )));
        }

        for (index, image) in command.images.iter().enumerate() {
            if !image.is_image() {
                return Err(ApplicationError::validation(format!(
                    "File {} is not an image: {}",
                    index + 1,
                    image.mime_type
                )));
            }
            if image.is_empty() {
                return Err(ApplicationError::validation(format!(
                    "File {} is empty",
                    index + 1
                )));
            }
            if image.len() > self.limits.max_image_bytes {
                return Err(ApplicationError::validation(format!(
                    "File {} exceeds {} bytes",
                    index + 1,
                    self.limits.max_image_bytes
                )));
            }
        }

        Ok(())
    }
}
