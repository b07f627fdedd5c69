//! Application services and ports.

#![forbid(unsafe_code)]

pub mod like_keys;
mod like_ports;
mod like_service;
mod rate_limit_service;

pub use like_ports::{ContentCatalog, LikeRepository};
pub use like_service::{CastVoteInput, LikePolicy, LikeService};
pub use rate_limit_service::{AttemptInfo, RateLimitRepository, RateLimitRule, RateLimitService};
