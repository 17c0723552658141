//! Token-bucket rate limiting for provider calls.
//!
//! Hosted model APIs enforce a fixed request rate per credential.
//! [`RateLimiter`] keeps the caller under that rate locally: each call
//! takes one token, and when the bucket is empty the caller waits for
//! the next refill instead of bursting.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A token-bucket rate limiter.
///
/// Cheap to clone; clones share the same bucket.
#[derive(Clone)]
pub struct RateLimiter {
    bucket: Arc<Mutex<Bucket>>,
    rate: f64,
    burst: f64,
}

struct Bucket {
    tokens: f64,
    refilled: Instant,
}

impl RateLimiter {
    /// Create a limiter allowing `requests_per_second` sustained, with
    /// at most `max_burst` tokens accumulated while idle.
    pub fn new(requests_per_second: f64, max_burst: f64) -> Self {
        let burst = max_burst.max(1.0);
        Self {
            bucket: Arc::new(Mutex::new(Bucket {
                tokens: burst,
                refilled: Instant::now(),
            })),
            rate: requests_per_second.max(f64::MIN_POSITIVE),
            burst,
        }
    }

    /// Create a limiter from a requests-per-minute budget with no burst.
    pub fn per_minute(requests_per_minute: f64) -> Self {
        Self::new(requests_per_minute / 60.0, 1.0)
    }

    /// Wait until a token is available, then take it.
    pub async fn acquire(&self) {
        loop {
            match self.try_acquire() {
                Ok(()) => return,
                Err(wait) => tokio::time::sleep(wait).await,
            }
        }
    }

    /// Take a token if one is available, otherwise return how long to
    /// wait before the next token arrives.
    fn try_acquire(&self) -> Result<(), Duration> {
        let mut bucket = self.bucket.lock().unwrap();

        let now = Instant::now();
        let elapsed = now.duration_since(bucket.refilled).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.rate).min(self.burst);
        bucket.refilled = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            let missing = 1.0 - bucket.tokens;
            Err(Duration::from_secs_f64(missing / self.rate))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_bucket_grants_burst() {
        let limiter = RateLimiter::new(1.0, 2.0);
        assert!(limiter.try_acquire().is_ok());
        assert!(limiter.try_acquire().is_ok());
        assert!(limiter.try_acquire().is_err());
    }

    #[test]
    fn empty_bucket_reports_wait() {
        let limiter = RateLimiter::new(10.0, 1.0);
        assert!(limiter.try_acquire().is_ok());
        let wait = limiter.try_acquire().unwrap_err();
        assert!(wait <= Duration::from_millis(100));
    }

    #[test]
    fn clones_share_the_bucket() {
        let limiter = RateLimiter::new(1.0, 1.0);
        let clone = limiter.clone();
        assert!(limiter.try_acquire().is_ok());
        assert!(clone.try_acquire().is_err());
    }

    #[tokio::test]
    async fn acquire_waits_for_refill() {
        let limiter = RateLimiter::new(50.0, 1.0);
        limiter.acquire().await;
        // Second acquire must wait ~20ms for the refill.
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
