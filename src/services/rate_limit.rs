use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Counter state of the current fixed window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    pub request_count: u32,
    pub window_reset_at: Instant,
}

/// Outbound request throttle
///
/// Callers past the limit sleep until the window boundary instead of being
/// rejected. The lock is held while sleeping, so waiting callers queue up in
/// arrival order.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    state: Mutex<RateWindow>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window,
            state: Mutex::new(RateWindow {
                request_count: 0,
                window_reset_at: Instant::now() + window,
            }),
        }
    }

    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Take a slot, waiting for the next window when the current one is full
    ///
    /// Returns the request's position within its window (starting at 1).
    pub async fn acquire(&self) -> u32 {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        if now >= state.window_reset_at {
            state.request_count = 0;
            state.window_reset_at = now + self.window;
        }

        if state.request_count >= self.max_requests {
            let wait = state.window_reset_at.saturating_duration_since(now);
            tracing::warn!(
                "Rate limit of {} requests reached. Waiting {}ms before next request.",
                self.max_requests,
                wait.as_millis()
            );

            sleep_until(state.window_reset_at).await;

            state.request_count = 0;
            state.window_reset_at = Instant::now() + self.window;
        }

        state.request_count += 1;
        state.request_count
    }

    pub async fn snapshot(&self) -> RateWindow {
        *self.state.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    #[tokio::test(start_paused = true)]
    async fn test_calls_within_limit_do_not_wait() {
        let limiter = RateLimiter::per_minute(10);
        let start = Instant::now();

        for expected in 1..=10 {
            assert_eq!(limiter.acquire().await, expected);
        }

        assert_eq!(Instant::now(), start);
        assert_eq!(limiter.snapshot().await.request_count, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_past_limit_waits_for_boundary() {
        let limiter = RateLimiter::per_minute(3);
        let boundary = limiter.snapshot().await.window_reset_at;

        for _ in 0..3 {
            limiter.acquire().await;
        }

        let mut blocked = task::spawn(limiter.acquire());
        assert_pending!(blocked.poll());

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_pending!(blocked.poll());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(blocked.is_woken());
        assert_ready_eq!(blocked.poll(), 1);
        drop(blocked);

        let window = limiter.snapshot().await;
        assert_eq!(window.request_count, 1);
        assert!(window.window_reset_at >= boundary + Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_exactly_at_boundary_resets_to_one() {
        let limiter = RateLimiter::per_minute(10);
        let boundary = limiter.snapshot().await.window_reset_at;

        limiter.acquire().await;
        limiter.acquire().await;

        tokio::time::advance(boundary - Instant::now()).await;
        assert_eq!(Instant::now(), boundary);

        assert_eq!(limiter.acquire().await, 1);
        assert_eq!(
            limiter.snapshot().await.window_reset_at,
            boundary + Duration::from_secs(60)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_more_than_max_per_window() {
        let limiter = RateLimiter::per_minute(4);
        let start = Instant::now();
        let mut starts = Vec::new();

        for _ in 0..10 {
            limiter.acquire().await;
            starts.push(Instant::now() - start);
        }

        for window in 0..3u64 {
            let lo = Duration::from_secs(window * 60);
            let hi = lo + Duration::from_secs(60);
            let in_window = starts.iter().filter(|t| **t >= lo && **t < hi).count();
            assert!(in_window <= 4, "window {} started {} calls", window, in_window);
        }
        assert!(starts[9] >= Duration::from_secs(120));
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        let limiter = RateLimiter::new(0, Duration::from_secs(1));
        assert_eq!(limiter.max_requests(), 1);
    }
}
