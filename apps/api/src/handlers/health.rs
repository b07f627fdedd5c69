use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::{HealthDependencyStatus, HealthResponse};
use crate::state::AppState;

mod checks;

use checks::check_redis;

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let redis = check_redis(state.redis_connection.clone()).await;

    let ready = redis.status != "error";
    let status = if ready { "ok" } else { "degraded" };
    let http_status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(HealthResponse { status, redis }))
}

fn dependency_status(status: &'static str, detail: Option<String>) -> HealthDependencyStatus {
    HealthDependencyStatus { status, detail }
}
