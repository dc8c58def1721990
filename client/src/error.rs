//! Client error types

use balance_plus_shared::{ErrorCode, RecordError};
use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by the on-device library
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The server answered with an error body
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Not signed in")]
    NotSignedIn,
}

impl ClientError {
    /// Server-reported error code, if any
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => *code,
            ClientError::Record(err) => Some(err.code()),
            _ => None,
        }
    }

    /// True when the session token was missing, invalid or expired
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::NotSignedIn)
            || self.code() == Some(ErrorCode::Unauthorized)
    }
}

/// `{"error": .., "code": ..}` as sent by the server
#[derive(Debug, Deserialize)]
pub(crate) struct ServerErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<ErrorCode>,
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_body_without_code() {
        let body: ServerErrorBody = serde_json::from_str(r#"{"error":"Server error"}"#).unwrap();
        assert_eq!(body.error, "Server error");
        assert_eq!(body.code, None);
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = ClientError::Api {
            status: 401,
            code: Some(ErrorCode::Unauthorized),
            message: "Invalid or expired token".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid or expired token");

        let err = ClientError::Api {
            status: 401,
            code: Some(ErrorCode::InvalidCredentials),
            message: "Invalid credentials".to_string(),
        };
        assert!(!err.is_unauthorized());
        assert!(ClientError::NotSignedIn.is_unauthorized());
    }
}
