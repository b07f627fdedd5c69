//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod filesystem_content_catalog;
mod in_memory_like_repository;
mod in_memory_rate_limit_repository;
mod redis_like_repository;
mod redis_rate_limit_repository;

pub use filesystem_content_catalog::FilesystemContentCatalog;
pub use in_memory_like_repository::InMemoryLikeRepository;
pub use in_memory_rate_limit_repository::InMemoryRateLimitRepository;
pub use redis_like_repository::RedisLikeRepository;
pub use redis_rate_limit_repository::RedisRateLimitRepository;
