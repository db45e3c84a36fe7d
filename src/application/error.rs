//! 应用层错误定义
//!
//! 统一的命令/查询错误类型，HTTP 层按变体映射状态码

use thiserror::Error;

use crate::application::ports::{HistoryStoreError, ModelError, RateLimitExceeded};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 冷却期内重复请求
    #[error("Rate limit exceeded. Please wait {retry_after_secs} seconds.")]
    RateLimited { retry_after_secs: u64 },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 外部模型服务错误（调用失败、响应格式不符）
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// 历史存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建上游格式错误
    pub fn upstream_format(message: impl Into<String>) -> Self {
        Self::UpstreamError(format!("unexpected response format: {}", message.into()))
    }
}

impl From<ModelError> for ApplicationError {
    fn from(err: ModelError) -> Self {
        Self::UpstreamError(err.to_string())
    }
}

impl From<HistoryStoreError> for ApplicationError {
    fn from(err: HistoryStoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<RateLimitExceeded> for ApplicationError {
    fn from(err: RateLimitExceeded) -> Self {
        Self::RateLimited {
            retry_after_secs: err.retry_after_secs,
        }
    }
}
