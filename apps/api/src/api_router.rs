use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

#[cfg(test)]
mod tests;

pub fn build_router(app_state: AppState) -> Router {
    let missing_slug = get(handlers::likes::missing_slug_handler)
        .post(handlers::likes::missing_slug_handler);

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/api/likes", missing_slug.clone())
        .route("/api/likes/", missing_slug)
        .route(
            "/api/likes/{*slug}",
            get(handlers::likes::like_status_handler).post(handlers::likes::cast_vote_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
