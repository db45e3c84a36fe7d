//! Rate Limiter Port - 请求频率限制
//!
//! 按客户端地址限制生成请求，具体实现在 infrastructure/memory 层

use std::net::IpAddr;
use thiserror::Error;

/// 冷却期内的重复请求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Rate limit exceeded. Please wait {retry_after_secs} seconds.")]
pub struct RateLimitExceeded {
    /// 剩余等待秒数（向上取整，至少为 1）
    pub retry_after_secs: u64,
}

/// Rate Limiter Port
pub trait RateLimiterPort: Send + Sync {
    /// 检查并记录一次请求
    ///
    /// 放行时记录当前时间；拒绝时不更新记录。
    fn check(&self, client: IpAddr) -> Result<(), RateLimitExceeded>;

    /// 清理已过冷却期的记录，返回清理数量
    fn evict_expired(&self) -> usize;
}
