//! In-Memory 实现
//!
//! 进程内状态，重启后清空

mod rate_limiter;

pub use rate_limiter::{InMemoryRateLimiter, DEFAULT_COOLDOWN};
