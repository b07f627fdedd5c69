//! Key layout shared by every like store adapter.
//!
//! These keys are an external contract: anything inspecting or migrating the
//! store relies on them.

use garden_domain::{ClientIp, Slug};

/// Prefix applied by rate limit adapters to every counter key.
pub const RATE_LIMIT_KEY_PREFIX: &str = "rl";

/// Key holding the like counter of a slug.
#[must_use]
pub fn like_count_key(slug: &Slug) -> String {
    format!("likes:{slug}")
}

/// Key marking that a client already voted for a slug.
#[must_use]
pub fn voter_mark_key(client_ip: &ClientIp, slug: &Slug) -> String {
    format!("voted:{client_ip}:{slug}")
}

/// Full key of a rate limit counter once the adapter prefix is applied.
#[must_use]
pub fn rate_limit_key(key: &str) -> String {
    format!("{RATE_LIMIT_KEY_PREFIX}:{key}")
}
