use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::ConnectInfo;
use axum::http::header::RETRY_AFTER;
use axum::http::{Request, StatusCode};
use garden_application::{LikeRepository, LikeService, RateLimitService};
use garden_core::{AppError, AppResult};
use garden_domain::{AllowedOrigins, ClientIp, Slug};
use garden_infrastructure::{
    FilesystemContentCatalog, InMemoryLikeRepository, InMemoryRateLimitRepository,
};
use ipnet::IpNet;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::build_router;
use crate::state::AppState;

const SITE_ORIGIN: &str = "https://chmal.it";

struct TestApp {
    router: Router,
    likes: Arc<InMemoryLikeRepository>,
    rate_limits: Arc<InMemoryRateLimitRepository>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_trusted_proxies(Vec::new())
    }

    fn with_trusted_proxies(trusted_proxies: Vec<IpNet>) -> Self {
        let likes = Arc::new(InMemoryLikeRepository::new());
        let rate_limits = Arc::new(InMemoryRateLimitRepository::new());
        let router = build_router(app_state(likes.clone(), rate_limits.clone(), trusted_proxies));

        Self {
            router,
            likes,
            rate_limits,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|_| panic!("test"));
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, retry_after, body)
    }

    async fn stored_keys(&self) -> Vec<String> {
        let mut keys = self.likes.keys().await;
        keys.extend(self.rate_limits.keys().await);
        keys
    }
}

fn app_state(
    like_repository: Arc<dyn LikeRepository>,
    rate_limits: Arc<InMemoryRateLimitRepository>,
    trusted_proxies: Vec<IpNet>,
) -> AppState {
    let mut allowed_origins = AllowedOrigins::new();
    assert!(allowed_origins.insert_url(SITE_ORIGIN).is_ok());

    AppState {
        like_service: LikeService::new(
            like_repository,
            Arc::new(FilesystemContentCatalog::from_slugs([
                "hello-world",
                "series/part-one",
            ])),
            RateLimitService::new(rate_limits),
            allowed_origins,
        ),
        redis_connection: None,
        trusted_proxies: trusted_proxies.into(),
    }
}

fn read(path: &str, client_ip: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header("x-forwarded-for", client_ip)
        .body(Body::empty())
        .unwrap_or_else(|_| panic!("test"))
}

fn vote(path: &str, client_ip: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("origin", SITE_ORIGIN)
        .header("x-forwarded-for", client_ip)
        .body(Body::empty())
        .unwrap_or_else(|_| panic!("test"))
}

#[tokio::test]
async fn fresh_slug_has_no_likes() {
    let app = TestApp::new();

    let (status, _, body) = app.send(read("/api/likes/hello-world", "203.0.113.7")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"count": 0, "hasVoted": false}));
}

#[tokio::test]
async fn vote_is_reflected_in_following_read() {
    let app = TestApp::new();

    let (status, _, body) = app.send(vote("/api/likes/hello-world", "203.0.113.7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"count": 1, "success": true}));

    let (_, _, body) = app.send(read("/api/likes/hello-world", "203.0.113.7")).await;
    assert_eq!(body, json!({"count": 1, "hasVoted": true}));

    let (_, _, body) = app.send(read("/api/likes/hello-world", "198.51.100.2")).await;
    assert_eq!(body, json!({"count": 1, "hasVoted": false}));
}

#[tokio::test]
async fn repeat_vote_is_refused_without_counting() {
    let app = TestApp::new();

    let _ = app.send(vote("/api/likes/hello-world", "203.0.113.7")).await;
    let (status, _, body) = app.send(vote("/api/likes/hello-world", "203.0.113.7")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Already voted", "success": false}));

    let (_, _, body) = app.send(read("/api/likes/hello-world", "203.0.113.7")).await;
    assert_eq!(body["count"], json!(1));
}

#[tokio::test]
async fn votes_from_two_clients_add_up() {
    let app = TestApp::new();

    let _ = app.send(vote("/api/likes/hello-world", "198.51.100.2")).await;
    let (_, _, body) = app.send(vote("/api/likes/hello-world", "203.0.113.7")).await;

    assert_eq!(body, json!({"count": 2, "success": true}));
}

#[tokio::test]
async fn sixth_attempt_within_window_is_rate_limited() {
    let app = TestApp::new();

    for _ in 0..5 {
        let _ = app.send(vote("/api/likes/hello-world", "203.0.113.7")).await;
    }
    let (status, retry_after, body) = app.send(vote("/api/likes/hello-world", "203.0.113.7")).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(retry_after.as_deref(), Some("60"));
    assert_eq!(body, json!({"error": "Rate limited"}));
}

#[tokio::test]
async fn missing_origin_is_forbidden() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/likes/hello-world")
        .header("x-forwarded-for", "203.0.113.7")
        .body(Body::empty())
        .unwrap_or_else(|_| panic!("test"));

    let (status, _, body) = app.send(request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"error": "Forbidden"}));
    assert!(app.stored_keys().await.is_empty());
}

#[tokio::test]
async fn foreign_referer_is_forbidden() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/likes/hello-world")
        .header("referer", "https://evil.example/hello-world")
        .header("x-forwarded-for", "203.0.113.7")
        .body(Body::empty())
        .unwrap_or_else(|_| panic!("test"));

    let (status, _, _) = app.send(request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, _, body) = app.send(read("/api/likes/hello-world", "203.0.113.7")).await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn oversized_slug_is_rejected_without_store_writes() {
    let app = TestApp::new();
    let path = format!("/api/likes/{}", "a".repeat(201));

    let (status, _, body) = app.send(vote(&path, "203.0.113.7")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid slug"}));
    assert!(app.stored_keys().await.is_empty());
}

#[tokio::test]
async fn unknown_slug_is_not_found_without_store_writes() {
    let app = TestApp::new();

    let (status, _, body) = app.send(vote("/api/likes/no-such-post", "203.0.113.7")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));

    let (status, _, _) = app.send(read("/api/likes/no-such-post", "203.0.113.7")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(app.stored_keys().await.is_empty());
}

#[tokio::test]
async fn missing_slug_is_a_bad_request() {
    let app = TestApp::new();

    for path in ["/api/likes", "/api/likes/"] {
        let (status, _, body) = app.send(read(path, "203.0.113.7")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Slug is required"}));
    }
}

#[tokio::test]
async fn nested_slugs_are_routed() {
    let app = TestApp::new();

    let (status, _, body) = app.send(vote("/api/likes/series/part-one", "203.0.113.7")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert!(
        app.stored_keys()
            .await
            .contains(&"likes:series/part-one".to_owned())
    );
}

#[tokio::test]
async fn untrusted_peer_cannot_vote_twice_by_rotating_headers() {
    let trusted = vec!["10.0.0.0/8".parse::<IpNet>().unwrap_or_else(|_| panic!("test"))];
    let app = TestApp::with_trusted_proxies(trusted);
    let peer = SocketAddr::from(([198, 51, 100, 9], 50_000));

    let mut first = vote("/api/likes/hello-world", "203.0.113.7");
    first.extensions_mut().insert(ConnectInfo(peer));
    let mut second = vote("/api/likes/hello-world", "203.0.113.8");
    second.extensions_mut().insert(ConnectInfo(peer));

    let (status, _, _) = app.send(first).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, body) = app.send(second).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Already voted"));
}

#[tokio::test]
async fn health_reports_disabled_redis_in_memory_mode() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap_or_else(|_| panic!("test"));

    let (status, _, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "redis": {"status": "disabled"}}));
}

struct UnreachableLikeRepository;

#[async_trait]
impl LikeRepository for UnreachableLikeRepository {
    async fn like_count(&self, _slug: &Slug) -> AppResult<i64> {
        Err(AppError::Internal("connection refused".to_owned()))
    }

    async fn has_voted(&self, _client_ip: &ClientIp, _slug: &Slug) -> AppResult<bool> {
        Err(AppError::Internal("connection refused".to_owned()))
    }

    async fn record_vote(
        &self,
        _client_ip: &ClientIp,
        _slug: &Slug,
        _voter_mark_ttl_seconds: u64,
    ) -> AppResult<i64> {
        Err(AppError::Internal("connection refused".to_owned()))
    }
}

#[tokio::test]
async fn store_failures_hide_internal_details() {
    let router = build_router(app_state(
        Arc::new(UnreachableLikeRepository),
        Arc::new(InMemoryRateLimitRepository::new()),
        Vec::new(),
    ));
    let app = TestApp {
        router,
        likes: Arc::new(InMemoryLikeRepository::new()),
        rate_limits: Arc::new(InMemoryRateLimitRepository::new()),
    };

    let (status, _, body) = app.send(read("/api/likes/hello-world", "203.0.113.7")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch likes"}));

    let (status, _, body) = app.send(vote("/api/likes/hello-world", "203.0.113.7")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Failed to increment likes", "success": false})
    );
}
