//! Bearer token extraction
//!
//! Protected handlers take an [`AuthUser`] argument; the extractor rejects
//! the request with 401 before the handler runs when the token is missing,
//! malformed, tampered with or expired.

use super::JwtService;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use balance_plus_shared::AuthError;
use uuid::Uuid;

/// Account resolved from a valid session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Resolve an `Authorization` header value to the account it was issued for
pub fn authenticate(jwt: &JwtService, header: Option<&str>) -> Result<AuthUser, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;
    let token = match header.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => token.trim(),
        Some((_, token)) if !token.trim().is_empty() => return Err(AuthError::InvalidToken),
        _ => return Err(AuthError::MalformedHeader),
    };

    let claims = jwt.validate_token(token)?;
    Ok(AuthUser {
        user_id: claims.user_id()?,
        email: claims.email,
    })
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        authenticate(app_state.jwt(), header).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request token");
            ApiError::from(e)
        })
    }
}
