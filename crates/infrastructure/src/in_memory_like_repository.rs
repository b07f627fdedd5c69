use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use garden_application::LikeRepository;
use garden_application::like_keys::{like_count_key, voter_mark_key};
use garden_core::AppResult;
use garden_domain::{ClientIp, Slug};
use tokio::sync::RwLock;

#[derive(Default)]
struct LikeState {
    counts: HashMap<String, i64>,
    voter_marks: HashMap<String, Instant>,
}

/// In-memory adapter for like counters and voter marks.
///
/// Keys mirror the Redis layout so tests can assert on them directly.
#[derive(Default)]
pub struct InMemoryLikeRepository {
    state: RwLock<LikeState>,
}

impl InMemoryLikeRepository {
    /// Creates an empty in-memory like repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every live key, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let state = self.state.read().await;
        let mut keys: Vec<String> = state
            .counts
            .keys()
            .cloned()
            .chain(
                state
                    .voter_marks
                    .iter()
                    .filter(|(_, expires_at)| **expires_at > now)
                    .map(|(key, _)| key.clone()),
            )
            .collect();
        keys.sort();
        keys
    }

    #[cfg(test)]
    async fn stored_voter_marks(&self) -> usize {
        self.state.read().await.voter_marks.len()
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn like_count(&self, slug: &Slug) -> AppResult<i64> {
        let state = self.state.read().await;
        Ok(state.counts.get(&like_count_key(slug)).copied().unwrap_or(0))
    }

    async fn has_voted(&self, client_ip: &ClientIp, slug: &Slug) -> AppResult<bool> {
        let key = voter_mark_key(client_ip, slug);
        {
            let state = self.state.read().await;
            match state.voter_marks.get(&key) {
                Some(expires_at) if *expires_at > Instant::now() => return Ok(true),
                Some(_) => {}
                None => return Ok(false),
            }
        }

        let mut state = self.state.write().await;
        if state
            .voter_marks
            .get(&key)
            .is_some_and(|expires_at| *expires_at <= Instant::now())
        {
            state.voter_marks.remove(&key);
        }

        Ok(false)
    }

    async fn record_vote(
        &self,
        client_ip: &ClientIp,
        slug: &Slug,
        voter_mark_ttl_seconds: u64,
    ) -> AppResult<i64> {
        let now = Instant::now();
        let expires_at = now
            .checked_add(Duration::from_secs(voter_mark_ttl_seconds))
            .unwrap_or(now);

        let mut state = self.state.write().await;
        state.voter_marks.retain(|_, mark_expires_at| *mark_expires_at > now);
        let count = state.counts.entry(like_count_key(slug)).or_insert(0);
        *count += 1;
        let count = *count;
        state
            .voter_marks
            .insert(voter_mark_key(client_ip, slug), expires_at);

        Ok(count)
    }
}
