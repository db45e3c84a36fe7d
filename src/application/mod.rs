//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（StoryModel、SpeechModel、HistoryStore、RateLimiter）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{
        DeleteHistoryEntryHandler, GenerateLimits, GenerateStoryHandler, GeneratedStory,
        HistoryIdClock,
    },
    DeleteHistoryEntry, GenerateStory,
};

pub use error::ApplicationError;

pub use ports::{
    // History store
    HistoryStoreError,
    HistoryStorePort,
    // Models
    ModelError,
    SpeechAudio,
    SpeechModelPort,
    SpeechRequest,
    StoryModelPort,
    StoryRequest,
    // Rate limiter
    RateLimitExceeded,
    RateLimiterPort,
};

pub use queries::{handlers::ListHistoryHandler, ListHistory};
