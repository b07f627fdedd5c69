use std::sync::Arc;

use garden_application::LikeService;
use garden_core::AppError;
use garden_infrastructure::FilesystemContentCatalog;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, LikeStoreConfig};
use crate::state::AppState;

use super::redis::build_redis_connection;

mod stores;

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let content_catalog = FilesystemContentCatalog::load(&config.content_dir)?;
    info!(
        content_dir = %config.content_dir.display(),
        entries = content_catalog.len(),
        "content catalog loaded"
    );

    let redis_connection = match &config.like_store {
        LikeStoreConfig::Redis { url } => Some(build_redis_connection(url).await?),
        LikeStoreConfig::Memory => None,
    };
    let store_set = stores::build_store_set(redis_connection.clone());

    let allowed_origins = config.allowed_origins();
    if allowed_origins.is_enforced() {
        let origins: Vec<&str> = allowed_origins.iter().collect();
        info!(?origins, "vote origin allow-list configured");
    } else {
        warn!("SITE_URL and VERCEL_URL are unset; vote origin check is disabled");
    }

    Ok(AppState {
        like_service: LikeService::new(
            store_set.like_repository,
            Arc::new(content_catalog),
            store_set.rate_limit_service,
            allowed_origins,
        ),
        redis_connection,
        trusted_proxies: config.trusted_proxies.clone().into(),
    })
}
