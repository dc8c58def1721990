//! Credential service: signup, login and account management
//!
//! Emails are normalized (trimmed, lowercased) before every lookup so that
//! uniqueness is case-insensitive. Login failures never reveal whether the
//! email exists.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{AccountRepository, Repositories};
use balance_plus_shared::validation::{normalize_email, validate_email, validate_password};
use balance_plus_shared::{Account, LoginResponse, ProfileResponse};
use tracing::{info, warn};
use uuid::Uuid;

/// Credential service
pub struct AccountService;

impl AccountService {
    /// Register a new account and return its id
    pub async fn signup(
        accounts: &dyn AccountRepository,
        passwords: &PasswordService,
        email: &str,
        password: &str,
    ) -> Result<Uuid, ApiError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation("Email and password required".to_string()));
        }
        validate_email(&email).map_err(ApiError::Validation)?;
        validate_password(password).map_err(ApiError::Validation)?;
        passwords.check_input(password).map_err(ApiError::Validation)?;

        if accounts.email_exists(&email).await? {
            info!("Signup rejected: email already registered");
            return Err(ApiError::DuplicateAccount);
        }

        let password_hash = passwords.hash_async(password.to_string()).await?;

        let account = accounts
            .create(&email, &password_hash)
            .await?
            .ok_or(ApiError::DuplicateAccount)?;

        info!(user_id = %account.id, "Account created");
        Ok(account.id)
    }

    /// Check credentials and issue a session token
    pub async fn login(
        accounts: &dyn AccountRepository,
        passwords: &PasswordService,
        jwt: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation("Email and password required".to_string()));
        }

        let account = match accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                passwords.verify_decoy(password.to_string()).await?;
                warn!("Login failed: unknown email");
                return Err(ApiError::InvalidCredentials);
            }
        };

        if !PasswordService::verify_async(password.to_string(), account.password_hash.clone())
            .await?
        {
            warn!(user_id = %account.id, "Login failed: wrong password");
            return Err(ApiError::InvalidCredentials);
        }

        let token = jwt.issue_token(account.id, &account.email)?;

        info!(user_id = %account.id, "Login succeeded");
        Ok(LoginResponse {
            token,
            user_id: account.id.to_string(),
            email: account.email,
        })
    }

    /// Replace the password after re-checking the current one
    pub async fn change_password(
        accounts: &dyn AccountRepository,
        passwords: &PasswordService,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let account = Self::require_account(accounts, user_id).await?;
        Self::check_password(&account, current_password).await?;
        validate_password(new_password).map_err(ApiError::Validation)?;
        passwords.check_input(new_password).map_err(ApiError::Validation)?;

        let password_hash = passwords.hash_async(new_password.to_string()).await?;
        if !accounts.update_password(user_id, &password_hash).await? {
            return Err(ApiError::Unauthorized("Account no longer exists".to_string()));
        }

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Delete the account together with its daily logs and mood entries
    pub async fn delete_account(
        repos: &Repositories,
        user_id: Uuid,
        password: &str,
    ) -> Result<(), ApiError> {
        let account = Self::require_account(repos.accounts.as_ref(), user_id).await?;
        Self::check_password(&account, password).await?;

        if !repos.delete_account(user_id).await? {
            return Err(ApiError::Unauthorized("Account no longer exists".to_string()));
        }

        info!(user_id = %user_id, "Account deleted");
        Ok(())
    }

    /// Public view of an account
    pub async fn profile(
        accounts: &dyn AccountRepository,
        user_id: Uuid,
    ) -> Result<ProfileResponse, ApiError> {
        let account = accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

        Ok(ProfileResponse {
            id: account.id.to_string(),
            email: account.email,
            created_at: account.created_at,
        })
    }

    // A valid token can outlive its account
    async fn require_account(
        accounts: &dyn AccountRepository,
        user_id: Uuid,
    ) -> Result<Account, ApiError> {
        accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))
    }

    async fn check_password(account: &Account, password: &str) -> Result<(), ApiError> {
        if password.is_empty()
            || !PasswordService::verify_async(password.to_string(), account.password_hash.clone())
                .await?
        {
            warn!(user_id = %account.id, "Password check failed");
            return Err(ApiError::InvalidCredentials);
        }
        Ok(())
    }
}
