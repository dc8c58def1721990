//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use balance_plus_shared::{AuthError, ErrorCode, ErrorResponse, RecordError};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already in use")]
    DuplicateAccount,

    /// Deliberately identical for unknown emails and wrong passwords
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// Wire code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Validation(_) => ErrorCode::ValidationError,
            ApiError::DuplicateAccount => ErrorCode::DuplicateAccount,
            ApiError::InvalidCredentials => ErrorCode::InvalidCredentials,
            ApiError::Unauthorized(_) => ErrorCode::Unauthorized,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::Internal(_) | ApiError::Database(_) => ErrorCode::ServerError,
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateAccount => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::DuplicateAccount => ApiError::DuplicateAccount,
            AuthError::MissingToken => {
                ApiError::Unauthorized("Missing authorization header".to_string())
            }
            AuthError::MalformedHeader => {
                ApiError::Unauthorized("Malformed authorization header".to_string())
            }
            AuthError::TokenExpired | AuthError::InvalidToken => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::NotFound(_) => ApiError::NotFound(err.to_string()),
            RecordError::InvalidRange(msg) | RecordError::Invalid(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Validation(msg) | ApiError::Unauthorized(msg) | ApiError::NotFound(msg) => {
                msg.clone()
            }
            ApiError::DuplicateAccount | ApiError::InvalidCredentials => self.to_string(),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "Server error".to_string()
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                "Server error".to_string()
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: self.code(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::DuplicateAccount, StatusCode::CONFLICT)]
    #[case(ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED)]
    #[case(ApiError::Unauthorized("Invalid token".to_string()), StatusCode::UNAUTHORIZED)]
    #[case(ApiError::NotFound("No log".to_string()), StatusCode::NOT_FOUND)]
    #[case(ApiError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_error_status(#[case] error: ApiError, #[case] expected: StatusCode) {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = ApiError::Internal(anyhow::anyhow!("connection refused")).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(body["error"], "Server error");
        assert_eq!(body["code"], "SERVER_ERROR");
    }

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        assert!(matches!(
            ApiError::from(AuthError::TokenExpired),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::InvalidCredentials
        ));
    }
}
