use axum::Json;
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use garden_core::AppError;
use serde::Serialize;
use tracing::error;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    success: Option<bool>,
}

/// HTTP API error wrapper around core application errors.
///
/// Errors raised while casting a vote additionally carry `success: false` when
/// the vote was refused or failed server-side.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    mutation: bool,
}

impl ApiError {
    /// Wraps an error raised by a state-changing request.
    pub fn mutation(error: AppError) -> Self {
        Self {
            error,
            mutation: true,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self {
            error: value,
            mutation: false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self.error {
            AppError::Internal(detail) if self.mutation => {
                error!(error = %detail, "failed to increment likes");
                "Failed to increment likes".to_owned()
            }
            AppError::Internal(detail) => {
                error!(error = %detail, "failed to fetch likes");
                "Failed to fetch likes".to_owned()
            }
            other => other.message().to_owned(),
        };

        let success = (self.mutation
            && matches!(self.error, AppError::Conflict(_) | AppError::Internal(_)))
        .then_some(false);

        let mut response = (
            status,
            Json(ErrorResponse {
                error: message,
                success,
            }),
        )
            .into_response();

        if let AppError::RateLimited {
            retry_after_seconds,
            ..
        } = self.error
        {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after_seconds));
        }

        response
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
