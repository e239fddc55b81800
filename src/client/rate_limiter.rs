//! Rate limiting for API requests

use parking_lot::Mutex;
use std::time::{Duration, Instant};

use crate::client::config::RateLimitConfig;

/// duration 동안 rate 회 허용, rate 0은 무제한
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub duration: Duration,
    pub rate: u32,
}

impl RateLimit {
    pub fn new(duration: Duration, rate: u32) -> Self {
        Self { duration, rate }
    }

    /// 제한 없음
    pub fn unlimited() -> Self {
        Self::new(Duration::from_secs(1), 0)
    }

    pub fn is_unlimited(&self) -> bool {
        self.rate == 0 || self.duration.is_zero()
    }

    fn tokens_per_sec(&self) -> f64 {
        self.rate as f64 / self.duration.as_secs_f64()
    }
}

impl From<RateLimitConfig> for RateLimit {
    fn from(cfg: RateLimitConfig) -> Self {
        Self::new(Duration::from_millis(cfg.duration_ms), cfg.rate)
    }
}

impl From<RateLimit> for RateLimitConfig {
    fn from(limit: RateLimit) -> Self {
        Self {
            duration_ms: limit.duration.as_millis() as u64,
            rate: limit.rate,
        }
    }
}

#[derive(Debug)]
struct Bucket {
    limit: RateLimit,
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        let max = self.limit.rate as f64;
        self.tokens = (self.tokens + elapsed * self.limit.tokens_per_sec()).min(max);
        self.last_refill = now;
    }
}

/// 레이트 리미터
///
/// 토큰 버킷 알고리즘 구현. 버킷 크기는 rate와 같다.
#[derive(Debug)]
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    /// 새로운 레이트 리미터 생성
    pub fn new(limit: RateLimit) -> Self {
        Self {
            bucket: Mutex::new(Bucket {
                limit,
                tokens: limit.rate as f64,
                last_refill: Instant::now(),
            }),
        }
    }

    /// 현재 제한값
    pub fn limit(&self) -> RateLimit {
        self.bucket.lock().limit
    }

    /// 제한값 변경, 버킷은 가득 찬 상태로 초기화
    pub fn set_limit(&self, limit: RateLimit) {
        let mut bucket = self.bucket.lock();
        bucket.limit = limit;
        bucket.tokens = limit.rate as f64;
        bucket.last_refill = Instant::now();
    }

    /// 토큰 획득 시도 (블로킹 없음)
    pub fn try_acquire(&self) -> Result<(), Duration> {
        let mut bucket = self.bucket.lock();
        if bucket.limit.is_unlimited() {
            return Ok(());
        }

        bucket.refill();
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            let missing = 1.0 - bucket.tokens;
            Err(Duration::from_secs_f64(
                missing / bucket.limit.tokens_per_sec(),
            ))
        }
    }

    /// 토큰 획득 (필요시 대기)
    pub async fn acquire(&self) {
        while let Err(wait) = self.try_acquire() {
            tokio::time::sleep(wait).await;
        }
    }

    /// 현재 사용 가능한 토큰 수
    pub fn available_tokens(&self) -> u64 {
        let mut bucket = self.bucket.lock();
        bucket.refill();
        bucket.tokens as u64
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimit::unlimited())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_never_blocks() {
        let limiter = RateLimiter::default();
        for _ in 0..1000 {
            assert!(limiter.try_acquire().is_ok());
        }
    }

    #[test]
    fn test_bucket_exhaustion() {
        let limiter = RateLimiter::new(RateLimit::new(Duration::from_secs(10), 2));
        assert!(limiter.try_acquire().is_ok());
        assert!(limiter.try_acquire().is_ok());

        let wait = limiter.try_acquire().unwrap_err();
        assert!(wait > Duration::ZERO);
        assert!(wait <= Duration::from_secs(5));
    }

    #[test]
    fn test_set_limit_resets_bucket() {
        let limiter = RateLimiter::new(RateLimit::new(Duration::from_secs(10), 1));
        assert!(limiter.try_acquire().is_ok());
        assert!(limiter.try_acquire().is_err());

        limiter.set_limit(RateLimit::new(Duration::from_secs(1), 5));
        assert_eq!(limiter.available_tokens(), 5);
        assert_eq!(limiter.limit().rate, 5);
    }

    #[test]
    fn test_config_conversion() {
        let cfg = RateLimitConfig {
            duration_ms: 10_000,
            rate: 100,
        };
        let limit = RateLimit::from(cfg);
        assert_eq!(limit.duration, Duration::from_secs(10));
        assert_eq!(RateLimitConfig::from(limit), cfg);
    }

    #[tokio::test]
    async fn test_acquire_waits_for_refill() {
        let limiter = RateLimiter::new(RateLimit::new(Duration::from_millis(50), 1));
        limiter.acquire().await;
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
