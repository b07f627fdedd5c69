use std::sync::Arc;

use garden_application::{LikeRepository, RateLimitRepository, RateLimitService};
use garden_infrastructure::{
    InMemoryLikeRepository, InMemoryRateLimitRepository, RedisLikeRepository,
    RedisRateLimitRepository,
};
use redis::aio::ConnectionManager;
use tracing::warn;

pub(super) struct StoreSet {
    pub like_repository: Arc<dyn LikeRepository>,
    pub rate_limit_service: RateLimitService,
}

/// Picks the Redis adapters when a connection exists, process memory otherwise.
pub(super) fn build_store_set(redis_connection: Option<ConnectionManager>) -> StoreSet {
    let (like_repository, rate_limit_repository): (
        Arc<dyn LikeRepository>,
        Arc<dyn RateLimitRepository>,
    ) = match redis_connection {
        Some(connection) => (
            Arc::new(RedisLikeRepository::new(connection.clone())),
            Arc::new(RedisRateLimitRepository::new(connection)),
        ),
        None => {
            warn!("LIKES_STORE=memory; likes are lost on restart and not shared between instances");
            (
                Arc::new(InMemoryLikeRepository::new()),
                Arc::new(InMemoryRateLimitRepository::new()),
            )
        }
    };

    StoreSet {
        like_repository,
        rate_limit_service: RateLimitService::new(rate_limit_repository),
    }
}
