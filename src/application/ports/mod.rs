//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod history_store;
mod models;
mod rate_limiter;

pub use history_store::{HistoryStoreError, HistoryStorePort};
pub use models::{
    ModelError, SpeechAudio, SpeechModelPort, SpeechRequest, StoryModelPort, StoryRequest,
};
pub use rate_limiter::{RateLimitExceeded, RateLimiterPort};
