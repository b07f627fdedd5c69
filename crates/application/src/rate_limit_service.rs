//! Rate limiting ports and application service.
//!
//! Implements a fixed-window rate limiter: every key owns a counter that
//! expires with its window, so bursts straddling a window boundary can reach
//! twice the configured limit.

mod config;
mod ports;
mod service;


pub use config::RateLimitRule;
pub use ports::{AttemptInfo, RateLimitRepository};
pub use service::RateLimitService;
