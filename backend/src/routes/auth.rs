//! Authentication routes
//!
//! Signup, login and the authenticated account endpoints. Password hashing
//! runs on the blocking pool inside the services.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::AccountService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use balance_plus_shared::types::{
    ChangePasswordRequest, DeleteAccountRequest, LoginRequest, LoginResponse, ProfileResponse,
    SignupRequest, SignupResponse,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(get_profile))
        .route("/password", post(change_password))
        .route("/account", delete(delete_account))
}

/// POST /auth/signup
async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let Json(req) = payload?;
    let user_id = AccountService::signup(
        state.repos.accounts.as_ref(),
        state.passwords(),
        &req.email,
        &req.password,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created".to_string(),
            user_id: user_id.to_string(),
        }),
    ))
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    let response = AccountService::login(
        state.repos.accounts.as_ref(),
        state.passwords(),
        state.jwt(),
        &req.email,
        &req.password,
    )
    .await?;
    Ok(Json(response))
}

/// GET /auth/me
async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = AccountService::profile(state.repos.accounts.as_ref(), auth_user.user_id).await?;
    Ok(Json(profile))
}

/// POST /auth/password
async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(req) = payload?;
    AccountService::change_password(
        state.repos.accounts.as_ref(),
        state.passwords(),
        auth_user.user_id,
        &req.current_password,
        &req.new_password,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /auth/account
async fn delete_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<DeleteAccountRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(req) = payload?;
    AccountService::delete_account(state.repos(), auth_user.user_id, &req.password).await?;
    Ok(StatusCode::NO_CONTENT)
}
