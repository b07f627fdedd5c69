//! Domain types and invariants for article likes.

#![forbid(unsafe_code)]

mod client;
mod like;
mod origin;
mod slug;

pub use client::ClientIp;
pub use like::{LikeStatus, VoteReceipt};
pub use origin::AllowedOrigins;
pub use slug::{MAX_SLUG_LENGTH, Slug};
