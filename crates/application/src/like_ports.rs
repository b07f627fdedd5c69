use async_trait::async_trait;
use garden_core::AppResult;
use garden_domain::{ClientIp, Slug};

/// Repository port for like counters and voter marks.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Returns the like count for a slug, `0` when nothing was recorded.
    async fn like_count(&self, slug: &Slug) -> AppResult<i64>;

    /// Returns whether a voter mark exists for the client and slug.
    async fn has_voted(&self, client_ip: &ClientIp, slug: &Slug) -> AppResult<bool>;

    /// Increments the like count and stores the voter mark with the given TTL.
    ///
    /// Returns the like count after the increment.
    async fn record_vote(
        &self,
        client_ip: &ClientIp,
        slug: &Slug,
        voter_mark_ttl_seconds: u64,
    ) -> AppResult<i64>;
}

/// Lookup port confirming that a slug belongs to published content.
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    /// Returns whether a published item exists for the slug.
    async fn contains(&self, slug: &Slug) -> AppResult<bool>;
}
