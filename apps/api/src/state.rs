use std::sync::Arc;

use garden_application::LikeService;
use ipnet::IpNet;
use redis::aio::ConnectionManager;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub like_service: LikeService,
    pub redis_connection: Option<ConnectionManager>,
    pub trusted_proxies: Arc<[IpNet]>,
}
