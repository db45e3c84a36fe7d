//! Application State
//!
//! 包含所有 Command/Query Handlers 及限流器

use std::sync::Arc;

use crate::application::{
    // Command handlers
    DeleteHistoryEntryHandler, GenerateLimits, GenerateStoryHandler,
    // Query handlers
    ListHistoryHandler,
    // Ports
    HistoryStorePort, RateLimiterPort, SpeechModelPort, StoryModelPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub rate_limiter: Arc<dyn RateLimiterPort>,

    // ========== Command Handlers ==========
    pub generate_story_handler: GenerateStoryHandler,
    pub delete_history_handler: DeleteHistoryEntryHandler,

    // ========== Query Handlers ==========
    pub list_history_handler: ListHistoryHandler,
}

impl AppState {
    /// 创建应用状态
    ///
    /// `audio_base_url` 为历史音频的公开地址前缀，例如 `http://localhost:8000/history`
    pub fn new(
        story_model: Arc<dyn StoryModelPort>,
        speech_model: Arc<dyn SpeechModelPort>,
        history_store: Arc<dyn HistoryStorePort>,
        rate_limiter: Arc<dyn RateLimiterPort>,
        audio_base_url: impl Into<String>,
        limits: GenerateLimits,
    ) -> Self {
        Self {
            // Ports
            rate_limiter,

            // Command handlers
            generate_story_handler: GenerateStoryHandler::new(
                story_model,
                speech_model,
                history_store.clone(),
                audio_base_url,
                limits,
            ),
            delete_history_handler: DeleteHistoryEntryHandler::new(history_store.clone()),

            // Query handlers
            list_history_handler: ListHistoryHandler::new(history_store),
        }
    }
}
