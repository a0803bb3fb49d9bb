use std::time::{Instant, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

const SOFT_LIMIT_PER_MINUTE: u32 = 30;

pub struct RateLimiter {
    state: Mutex<RateLimitState>,
}

struct RateLimitState {
    remaining: u32,
    reset_at: Option<Instant>,
    requests_this_minute: u32,
    minute_start: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub remaining: u32,
    pub reset_epoch: Option<u64>,
}

impl RateLimitSnapshot {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())?;
        let reset_epoch = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        Some(Self {
            remaining,
            reset_epoch,
        })
    }

    pub fn seconds_until_reset(&self, now_epoch: u64) -> u64 {
        self.reset_epoch
            .map(|reset| reset.saturating_sub(now_epoch))
            .unwrap_or(0)
    }
}

pub(crate) fn epoch_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RateLimitState {
                remaining: 5000,
                reset_at: None,
                requests_this_minute: 0,
                minute_start: Instant::now(),
            }),
        }
    }

    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        // Wait out an exhausted quota until GitHub's reset time
        if state.remaining == 0 {
            if let Some(reset_at) = state.reset_at {
                let now = Instant::now();
                if reset_at > now {
                    let wait_duration = reset_at - now;
                    drop(state);
                    tracing::info!("Rate limited, waiting {:?}", wait_duration);
                    sleep(wait_duration).await;
                    state = self.state.lock().await;
                }
            }
            state.remaining = 1;
            state.reset_at = None;
        }

        // Soft rate limiting: max 30 requests per minute to be polite
        let minute_elapsed = state.minute_start.elapsed();
        if minute_elapsed < Duration::from_secs(60) {
            if state.requests_this_minute >= SOFT_LIMIT_PER_MINUTE {
                let wait_time = Duration::from_secs(60) - minute_elapsed;
                drop(state);
                tracing::debug!("Soft rate limiting, waiting {:?}", wait_time);
                sleep(wait_time).await;
                state = self.state.lock().await;
                state.requests_this_minute = 0;
                state.minute_start = Instant::now();
            }
        } else {
            state.requests_this_minute = 0;
            state.minute_start = Instant::now();
        }

        state.requests_this_minute += 1;
    }

    pub async fn update(&self, headers: &HeaderMap) {
        let Some(snapshot) = RateLimitSnapshot::from_headers(headers) else {
            return;
        };

        let mut state = self.state.lock().await;
        state.remaining = snapshot.remaining;
        let wait_secs = snapshot.seconds_until_reset(epoch_now());
        state.reset_at = (wait_secs > 0).then(|| Instant::now() + Duration::from_secs(wait_secs));
        tracing::debug!("GitHub rate limit remaining: {}", snapshot.remaining);
    }

    #[cfg(test)]
    pub(crate) async fn remaining(&self) -> u32 {
        self.state.lock().await.remaining
    }

    #[cfg(test)]
    pub(crate) async fn requests_this_minute(&self) -> u32 {
        self.state.lock().await.requests_this_minute
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_snapshot_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000060"));
        let snapshot = RateLimitSnapshot::from_headers(&headers).unwrap();
        assert_eq!(snapshot.remaining, 0);
        assert_eq!(snapshot.seconds_until_reset(1_700_000_000), 60);
        assert_eq!(snapshot.seconds_until_reset(1_800_000_000), 0);
    }

    #[test]
    fn test_snapshot_requires_remaining() {
        assert!(RateLimitSnapshot::from_headers(&HeaderMap::new()).is_none());
    }

    #[tokio::test]
    async fn test_update_tracks_remaining() {
        let limiter = RateLimiter::new();
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("4321"));
        limiter.update(&headers).await;
        assert_eq!(limiter.remaining().await, 4321);

        limiter.wait().await;
        assert_eq!(limiter.remaining().await, 4321);
    }
}
