//! Domain Layer - 领域层
//!
//! 包含:
//! - Story Context: 图片输入、生成参数与提示词
//! - History Context: 生成历史记录
//! - Audio: PCM → WAV 容器封装

pub mod audio;
pub mod history;
pub mod story;
