use crate::rate_limit_service::RateLimitRule;

const RATE_WINDOW_SECONDS: u64 = 60;
const RATE_LIMIT_CLIENT_SLUG: i64 = 5;
const RATE_LIMIT_CLIENT: i64 = 20;
const VOTER_MARK_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Limits and retention applied when casting votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePolicy {
    /// Attempts allowed per client and slug within a window.
    pub client_slug_rule: RateLimitRule,
    /// Attempts allowed per client across all slugs within a window.
    pub client_rule: RateLimitRule,
    /// How long a voter mark blocks repeat votes.
    pub voter_mark_ttl_seconds: u64,
}

impl Default for LikePolicy {
    fn default() -> Self {
        Self {
            client_slug_rule: RateLimitRule::new(
                "likes:ipslug",
                RATE_LIMIT_CLIENT_SLUG,
                RATE_WINDOW_SECONDS,
            ),
            client_rule: RateLimitRule::new("likes:ip", RATE_LIMIT_CLIENT, RATE_WINDOW_SECONDS),
            voter_mark_ttl_seconds: VOTER_MARK_TTL_SECONDS,
        }
    }
}
