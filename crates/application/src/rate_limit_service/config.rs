/// Configuration for a rate limit rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitRule {
    /// Category prepended to every key checked against this rule
    /// (e.g., "likes:ip", "likes:ipslug").
    pub category: String,
    /// Maximum number of attempts allowed in the window.
    pub max_attempts: i64,
    /// Window duration in seconds.
    pub window_seconds: u64,
}

impl RateLimitRule {
    /// Creates a new rate limit rule.
    #[must_use]
    pub fn new(category: impl Into<String>, max_attempts: i64, window_seconds: u64) -> Self {
        Self {
            category: category.into(),
            max_attempts,
            window_seconds,
        }
    }
}
