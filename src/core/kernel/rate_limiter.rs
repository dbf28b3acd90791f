//! Client-side request spacing.
//!
//! Every request passes through [`RateLimiter::acquire`] before it is put on
//! the wire. Admissions are spaced at least `min_interval` apart, measured from
//! the previous admission rather than from when its response arrived.

use crate::core::config::ConfigError;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    /// Time of the last admitted request. The lock is held across the wait so
    /// callers are admitted one at a time, in lock (FIFO) order.
    last_admission: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter from a requests-per-second budget (2.0 -> 500 ms spacing)
    pub fn per_second(requests_per_second: f64) -> Result<Self, ConfigError> {
        if !requests_per_second.is_finite() || requests_per_second <= 0.0 {
            return Err(ConfigError::InvalidConfiguration(format!(
                "requests per second must be a positive number, got {}",
                requests_per_second
            )));
        }

        Ok(Self::with_interval(Duration::from_secs_f64(
            1.0 / requests_per_second,
        )))
    }

    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_admission: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next request may be sent, then record its admission.
    ///
    /// The remaining wait is computed after the lock is taken, so time spent
    /// queued behind other callers counts toward the interval.
    pub async fn acquire(&self) {
        let mut last_admission = self.last_admission.lock().await;

        if let Some(previous) = *last_admission {
            let ready_at = previous + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                debug!(wait_ms = (ready_at - now).as_millis() as u64, "rate limiter delaying request");
                sleep_until(ready_at).await;
            }
        }

        *last_admission = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_interval_from_rate() {
        let limiter = RateLimiter::per_second(2.0).unwrap();
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));

        let limiter = RateLimiter::per_second(4.0).unwrap();
        assert_eq!(limiter.min_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_invalid_rates() {
        assert!(RateLimiter::per_second(0.0).is_err());
        assert!(RateLimiter::per_second(-1.0).is_err());
        assert!(RateLimiter::per_second(f64::NAN).is_err());
        assert!(RateLimiter::per_second(f64::INFINITY).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_request_is_not_delayed() {
        let limiter = RateLimiter::per_second(2.0).unwrap();
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_requests_are_spaced() {
        let limiter = RateLimiter::per_second(2.0).unwrap();
        let start = Instant::now();

        for _ in 0..5 {
            limiter.acquire().await;
        }

        // (N - 1) * 500ms
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_time_counts_toward_interval() {
        let limiter = RateLimiter::per_second(2.0).unwrap();
        limiter.acquire().await;

        tokio::time::sleep(Duration::from_millis(400)).await;
        let before = Instant::now();
        limiter.acquire().await;
        let waited = before.elapsed();
        assert!(waited >= Duration::from_millis(100));
        assert!(waited < Duration::from_millis(150));

        tokio::time::sleep(Duration::from_secs(2)).await;
        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_never_closer_than_interval() {
        let limiter = Arc::new(RateLimiter::per_second(5.0).unwrap());
        let interval = limiter.min_interval();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.acquire().await;
                    Instant::now()
                })
            })
            .collect();

        let mut admissions = Vec::new();
        for handle in handles {
            admissions.push(handle.await.unwrap());
        }
        admissions.sort();

        for pair in admissions.windows(2) {
            assert!(pair[1] - pair[0] >= interval);
        }
    }
}
