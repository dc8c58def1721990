//! Application state management
//!
//! Shared resources handed to every handler through Axum's state
//! extraction. Everything here is built once at startup and is cheap to
//! clone (pools, repositories and keys sit behind `Arc`).

use crate::auth::{JwtService, PasswordService};
use crate::config::AppConfig;
use crate::repositories::Repositories;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Account, daily log and mood stores
    pub repos: Repositories,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    pub passwords: PasswordService,
}

impl AppState {
    /// Create the application state around a set of repositories
    pub fn new(repos: Repositories, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry_secs);
        let passwords = PasswordService::new(&config.auth);

        Self {
            repos,
            config: Arc::new(config),
            jwt,
            passwords,
        }
    }

    /// State backed by fresh in-memory stores
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Repositories::memory(), config)
    }

    #[inline]
    pub fn repos(&self) -> &Repositories {
        &self.repos
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }
}
