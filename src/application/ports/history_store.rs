//! History Store Port - 出站端口
//!
//! 生成历史的持久化抽象：音频 + 元数据成对存储

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::history::{HistoryEntry, HistoryId};

/// 历史存储错误
#[derive(Debug, Error)]
pub enum HistoryStoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for HistoryStoreError {
    fn from(err: std::io::Error) -> Self {
        HistoryStoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HistoryStoreError {
    fn from(err: serde_json::Error) -> Self {
        HistoryStoreError::Serialization(err.to_string())
    }
}

/// History Store Port
#[async_trait]
pub trait HistoryStorePort: Send + Sync {
    /// 写入一条记录及其 WAV 音频
    async fn append(&self, entry: &HistoryEntry, audio: &[u8]) -> Result<(), HistoryStoreError>;

    /// 列出所有可解析的记录，按 id 降序
    async fn list_all(&self) -> Result<Vec<HistoryEntry>, HistoryStoreError>;

    /// 删除记录及音频，不存在时同样返回成功
    async fn delete(&self, id: HistoryId) -> Result<(), HistoryStoreError>;
}
