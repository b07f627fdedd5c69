//! Redis-backed like repository.

use async_trait::async_trait;
use garden_application::LikeRepository;
use garden_application::like_keys::{like_count_key, voter_mark_key};
use garden_core::{AppError, AppResult};
use garden_domain::{ClientIp, Slug};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

const VOTER_MARK_VALUE: &str = "1";

/// Redis implementation of the like repository port.
///
/// Counters are plain integers under `likes:<slug>`; voter marks are
/// `voted:<ip>:<slug>` entries that expire on their own.
#[derive(Clone)]
pub struct RedisLikeRepository {
    connection: ConnectionManager,
}

impl RedisLikeRepository {
    /// Creates a repository on top of a shared Redis connection.
    #[must_use]
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl LikeRepository for RedisLikeRepository {
    async fn like_count(&self, slug: &Slug) -> AppResult<i64> {
        let mut connection = self.connection.clone();
        let count: Option<i64> = connection
            .get(like_count_key(slug))
            .await
            .map_err(|error| AppError::Internal(format!("failed to read like count: {error}")))?;

        Ok(count.unwrap_or(0))
    }

    async fn has_voted(&self, client_ip: &ClientIp, slug: &Slug) -> AppResult<bool> {
        let mut connection = self.connection.clone();
        connection
            .exists(voter_mark_key(client_ip, slug))
            .await
            .map_err(|error| AppError::Internal(format!("failed to read voter mark: {error}")))
    }

    async fn record_vote(
        &self,
        client_ip: &ClientIp,
        slug: &Slug,
        voter_mark_ttl_seconds: u64,
    ) -> AppResult<i64> {
        let mut connection = self.connection.clone();
        let (count,): (i64,) = redis::pipe()
            .atomic()
            .incr(like_count_key(slug), 1)
            .set_ex(
                voter_mark_key(client_ip, slug),
                VOTER_MARK_VALUE,
                voter_mark_ttl_seconds,
            )
            .ignore()
            .query_async(&mut connection)
            .await
            .map_err(|error| AppError::Internal(format!("failed to record vote: {error}")))?;

        Ok(count)
    }
}
