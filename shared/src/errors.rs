//! Error types for the Balance+ application

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable error code carried in every error body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    DuplicateAccount,
    InvalidCredentials,
    Unauthorized,
    NotFound,
    ServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DuplicateAccount => "DUPLICATE_ACCOUNT",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ServerError => "SERVER_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already in use")]
    DuplicateAccount,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing token")]
    MissingToken,

    #[error("Malformed authorization header")]
    MalformedHeader,
}

impl AuthError {
    /// Wire code this error is reported under.
    ///
    /// Every token problem collapses to `UNAUTHORIZED`.
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::DuplicateAccount => ErrorCode::DuplicateAccount,
            AuthError::TokenExpired
            | AuthError::InvalidToken
            | AuthError::MissingToken
            | AuthError::MalformedHeader => {
                ErrorCode::Unauthorized
            }
        }
    }
}

/// Daily log errors, shared by the server store and the on-device journal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("No log saved for {0}")]
    NotFound(NaiveDate),

    #[error("{0}")]
    InvalidRange(String),

    #[error("{0}")]
    Invalid(String),
}

impl RecordError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RecordError::NotFound(_) => ErrorCode::NotFound,
            RecordError::InvalidRange(_) | RecordError::Invalid(_) => ErrorCode::ValidationError,
        }
    }
}
