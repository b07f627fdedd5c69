//! Redis-backed rate limit repository.

use async_trait::async_trait;
use garden_application::like_keys::rate_limit_key;
use garden_application::{AttemptInfo, RateLimitRepository};
use garden_core::{AppError, AppResult};
use redis::Script;
use redis::aio::ConnectionManager;

const RECORD_ATTEMPT_SCRIPT: &str = r#"
local key = KEYS[1]
local window = tonumber(ARGV[1])

local count = redis.call('INCR', key)
if count == 1 or redis.call('TTL', key) < 0 then
  redis.call('EXPIRE', key, window)
end

return count
"#;

/// Redis implementation of the rate limit repository port.
#[derive(Clone)]
pub struct RedisRateLimitRepository {
    connection: ConnectionManager,
}

impl RedisRateLimitRepository {
    /// Creates a repository on top of a shared Redis connection.
    #[must_use]
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl RateLimitRepository for RedisRateLimitRepository {
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

        let mut connection = self.connection.clone();
        let script = Script::new(RECORD_ATTEMPT_SCRIPT);
        let attempt_count: i64 = script
            .key(rate_limit_key(key))
            .arg(window_duration_seconds)
            .invoke_async(&mut connection)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to record redis rate limit attempt: {error}"
                ))
            })?;

        Ok(AttemptInfo { attempt_count })
    }
}
