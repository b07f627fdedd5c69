use async_trait::async_trait;

use garden_core::AppResult;

/// Repository port for rate limit persistence.
#[async_trait]
pub trait RateLimitRepository: Send + Sync {
    /// Records an attempt for the given key.
    ///
    /// The first attempt of a window arms the counter's expiry; the counter
    /// disappears once the window lapses. Returns the attempt count within the
    /// active window, including this attempt.
    async fn record_attempt(
        &self,
        key: &str,
        window_duration_seconds: u64,
    ) -> AppResult<AttemptInfo>;
}

/// Information about the current rate limit window for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptInfo {
    /// Number of attempts in the current window (including this one).
    pub attempt_count: i64,
}
