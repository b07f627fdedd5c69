use garden_core::AppError;
use redis::aio::ConnectionManager;

/// Opens the shared Redis connection used by the like and rate-limit stores.
///
/// The manager reconnects on its own after the initial handshake succeeds.
pub async fn build_redis_connection(redis_url: &str) -> Result<ConnectionManager, AppError> {
    let client = redis::Client::open(redis_url)
        .map_err(|error| AppError::Validation(format!("invalid REDIS_URL: {error}")))?;

    ConnectionManager::new(client)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))
}
