//! Like counting for published content.
//!
//! Reads return the like count and voter status of a slug. Writes walk a fixed
//! sequence of checks (slug, origin, per-pair rate limit, per-client rate
//! limit, duplicate vote) and only touch the like counter once every check
//! has passed.

mod policy;


use std::sync::Arc;

use garden_core::{AppError, AppResult};
use garden_domain::{AllowedOrigins, ClientIp, LikeStatus, Slug, VoteReceipt};

use crate::like_ports::{ContentCatalog, LikeRepository};
use crate::rate_limit_service::RateLimitService;

pub use policy::LikePolicy;

/// Input for casting a vote.
#[derive(Debug, Clone)]
pub struct CastVoteInput {
    /// Raw slug taken from the request path.
    pub slug: String,
    /// `Origin` header value, falling back to `Referer`.
    pub origin: Option<String>,
    /// Best-effort identity of the caller.
    pub client_ip: ClientIp,
}

/// Application service for reading and casting likes.
#[derive(Clone)]
pub struct LikeService {
    like_repository: Arc<dyn LikeRepository>,
    content_catalog: Arc<dyn ContentCatalog>,
    rate_limit_service: RateLimitService,
    allowed_origins: AllowedOrigins,
    policy: LikePolicy,
}

impl LikeService {
    /// Creates a like service with the default policy.
    #[must_use]
    pub fn new(
        like_repository: Arc<dyn LikeRepository>,
        content_catalog: Arc<dyn ContentCatalog>,
        rate_limit_service: RateLimitService,
        allowed_origins: AllowedOrigins,
    ) -> Self {
        Self {
            like_repository,
            content_catalog,
            rate_limit_service,
            allowed_origins,
            policy: LikePolicy::default(),
        }
    }

    /// Replaces the limits and retention used by the service.
    #[must_use]
    pub fn with_policy(mut self, policy: LikePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the like count of a slug and whether the client already voted.
    pub async fn like_status(&self, raw_slug: &str, client_ip: &ClientIp) -> AppResult<LikeStatus> {
        let slug = self.resolve_slug(raw_slug).await?;

        let count = self.like_repository.like_count(&slug).await?;
        let has_voted = self.like_repository.has_voted(client_ip, &slug).await?;

        Ok(LikeStatus { count, has_voted })
    }

    /// Records a vote for a slug on behalf of a client.
    pub async fn cast_vote(&self, input: CastVoteInput) -> AppResult<VoteReceipt> {
        let CastVoteInput {
            slug,
            origin,
            client_ip,
        } = input;

        let slug = self.resolve_slug(&slug).await?;

        if !self.allowed_origins.permits(origin.as_deref()) {
            return Err(AppError::Forbidden("Forbidden".to_owned()));
        }

        self.rate_limit_service
            .check_rate_limit(&self.policy.client_slug_rule, &format!("{client_ip}:{slug}"))
            .await?;
        self.rate_limit_service
            .check_rate_limit(&self.policy.client_rule, client_ip.as_str())
            .await?;

        if self.like_repository.has_voted(&client_ip, &slug).await? {
            return Err(AppError::Conflict("Already voted".to_owned()));
        }

        let count = self
            .like_repository
            .record_vote(&client_ip, &slug, self.policy.voter_mark_ttl_seconds)
            .await?;

        Ok(VoteReceipt { count })
    }

    async fn resolve_slug(&self, raw_slug: &str) -> AppResult<Slug> {
        let slug = Slug::new(raw_slug)?;

        if !self.content_catalog.contains(&slug).await? {
            return Err(AppError::NotFound("Not found".to_owned()));
        }

        Ok(slug)
    }
}
