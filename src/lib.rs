//! Picvox - 图片生成有声故事服务
//!
//! 架构设计: CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - story: 生成参数、图片与提示词
//! - history: 历史记录
//! - audio: WAV 容器
//!
//! 应用层 (application/):
//! - Ports: StoryModel, SpeechModel, HistoryStore, RateLimiter
//! - Commands: 生成故事、删除历史
//! - Queries: 历史列表
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 历史音频静态文件
//! - Adapters: Gemini REST 客户端
//! - Persistence: 文件历史存储
//! - Memory: 内存限流器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod testing;

pub use config::{load_config, AppConfig};
