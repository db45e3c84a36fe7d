//! In-Memory Rate Limiter Implementation
//!
//! 每个客户端地址一条 “最后放行时间” 记录。
//! 检查与记录在同一个 DashMap entry 锁内完成，同一地址的并发请求最多只有一个放行。

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use crate::application::ports::{RateLimitExceeded, RateLimiterPort};

/// 默认冷却时间
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(15);

/// 内存限流器
pub struct InMemoryRateLimiter {
    cooldown: Duration,
    last_accepted: DashMap<IpAddr, Instant>,
}

impl InMemoryRateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accepted: DashMap::new(),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// 当前记录的客户端数量
    pub fn tracked_clients(&self) -> usize {
        self.last_accepted.len()
    }

    /// 以指定时刻检查并记录
    ///
    /// 冷却时间为 0 表示关闭限流，不保留任何记录。
    pub fn check_at(&self, client: IpAddr, now: Instant) -> Result<(), RateLimitExceeded> {
        if self.cooldown.is_zero() {
            return Ok(());
        }

        match self.last_accepted.entry(client) {
            Entry::Occupied(mut entry) => {
                let elapsed = now.saturating_duration_since(*entry.get());
                if elapsed < self.cooldown {
                    let retry_after_secs = ceil_secs(self.cooldown - elapsed).max(1);
                    tracing::debug!(
                        client = %client,
                        retry_after_secs = retry_after_secs,
                        "Rate limit hit"
                    );
                    return Err(RateLimitExceeded { retry_after_secs });
                }
                entry.insert(now);
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
            }
        }
        Ok(())
    }

    /// 以指定时刻清理过期记录
    pub fn evict_expired_at(&self, now: Instant) -> usize {
        let before = self.last_accepted.len();
        self.last_accepted
            .retain(|_, last| now.saturating_duration_since(*last) < self.cooldown);
        before.saturating_sub(self.last_accepted.len())
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl RateLimiterPort for InMemoryRateLimiter {
    fn check(&self, client: IpAddr) -> Result<(), RateLimitExceeded> {
        self.check_at(client, Instant::now())
    }

    fn evict_expired(&self) -> usize {
        self.evict_expired_at(Instant::now())
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    const OTHER: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

    #[test]
    fn test_second_request_within_cooldown_is_rejected() {
        let limiter = InMemoryRateLimiter::default();
        let start = Instant::now();

        assert!(limiter.check_at(CLIENT, start).is_ok());

        let err = limiter
            .check_at(CLIENT, start + Duration::from_millis(4_500))
            .unwrap_err();
        // 剩余 10.5 秒，向上取整
        assert_eq!(err.retry_after_secs, 11);
    }

    #[test]
    fn test_request_after_cooldown_is_accepted() {
        let limiter = InMemoryRateLimiter::default();
        let start = Instant::now();

        assert!(limiter.check_at(CLIENT, start).is_ok());
        assert!(limiter.check_at(CLIENT, start + Duration::from_secs(1)).is_err());
        assert!(limiter.check_at(CLIENT, start + Duration::from_secs(15)).is_ok());
    }

    #[test]
    fn test_rejection_does_not_extend_window() {
        let limiter = InMemoryRateLimiter::default();
        let start = Instant::now();

        assert!(limiter.check_at(CLIENT, start).is_ok());
        assert!(limiter.check_at(CLIENT, start + Duration::from_secs(14)).is_err());
        // 仍以第一次放行的时间计算
        assert!(limiter.check_at(CLIENT, start + Duration::from_secs(16)).is_ok());
    }

    #[test]
    fn test_retry_after_is_at_least_one_second() {
        let limiter = InMemoryRateLimiter::default();
        let start = Instant::now();

        assert!(limiter.check_at(CLIENT, start).is_ok());
        let err = limiter
            .check_at(CLIENT, start + Duration::from_millis(14_999))
            .unwrap_err();
        assert_eq!(err.retry_after_secs, 1);
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = InMemoryRateLimiter::default();
        let start = Instant::now();

        assert!(limiter.check_at(CLIENT, start).is_ok());
        assert!(limiter.check_at(OTHER, start).is_ok());
        assert!(limiter.check_at(CLIENT, start).is_err());
    }

    #[test]
    fn test_evict_expired() {
        let limiter = InMemoryRateLimiter::default();
        let start = Instant::now();

        limiter.check_at(CLIENT, start).unwrap();
        limiter.check_at(OTHER, start + Duration::from_secs(10)).unwrap();

        let removed = limiter.evict_expired_at(start + Duration::from_secs(20));
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_concurrent_same_client_only_one_passes() {
        let limiter = std::sync::Arc::new(InMemoryRateLimiter::default());
        let now = Instant::now();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || limiter.check_at(CLIENT, now).is_ok())
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(accepted, 1);
    }

    #[test]
    fn test_zero_cooldown_tracks_nothing() {
        let limiter = InMemoryRateLimiter::new(Duration::ZERO);
        let start = Instant::now();

        for i in 0..50u8 {
            let client = IpAddr::V4(Ipv4Addr::new(10, 0, 1, i));
            assert!(limiter.check_at(client, start).is_ok());
            assert!(limiter.check_at(client, start).is_ok());
        }
        assert_eq!(limiter.tracked_clients(), 0);
    }
}
