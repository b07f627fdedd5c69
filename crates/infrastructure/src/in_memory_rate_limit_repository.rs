use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use garden_application::like_keys::rate_limit_key;
use garden_application::{AttemptInfo, RateLimitRepository};
use garden_core::{AppError, AppResult};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy)]
struct RateWindow {
    attempt_count: i64,
    expires_at: Instant,
}

/// In-memory adapter for rate limit counters.
#[derive(Default)]
pub struct InMemoryRateLimitRepository {
    windows: Mutex<HashMap<String, RateWindow>>,
}

impl InMemoryRateLimitRepository {
    /// Creates an empty in-memory rate limit repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the keys of every counter whose window is still open.
    pub async fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .windows
            .lock()
            .await
            .iter()
            .filter(|(_, window)| window.expires_at > now)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    #[cfg(test)]
    async fn stored_len(&self) -> usize {
        self.windows.lock().await.len()
    }
}

#[async_trait]
impl RateLimitRepository for InMemoryRateLimitRepository {
    async fn record_attempt(
        &self,
        key: &str,
        window_duration_seconds: u64,
    ) -> AppResult<AttemptInfo> {
        if window_duration_seconds == 0 {
            return Err(AppError::Validation(
                "window_duration_seconds must be greater than zero".to_owned(),
            ));
        }

        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        windows.retain(|_, window| window.expires_at > now);

        let window = windows.entry(rate_limit_key(key)).or_insert(RateWindow {
            attempt_count: 0,
            expires_at: now
                .checked_add(Duration::from_secs(window_duration_seconds))
                .unwrap_or(now),
        });
        window.attempt_count += 1;

        Ok(AttemptInfo {
            attempt_count: window.attempt_count,
        })
    }
}
