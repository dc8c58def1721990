//! Password hashing
//!
//! New hashes use bcrypt by default (argon2id when configured). Verification
//! dispatches on the stored hash's prefix, so accounts created under either
//! algorithm keep working after the setting changes.
//!
//! Both algorithms are CPU-bound; the `_async` variants move the work onto
//! the blocking thread pool.

use crate::config::{AuthConfig, PasswordAlgorithm};
use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// bcrypt only reads this many bytes of input and ignores the rest
pub const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing service
#[derive(Clone)]
pub struct PasswordService {
    algorithm: PasswordAlgorithm,
    bcrypt_cost: u32,
    // Hash checked against when an email is unknown, so that login costs the same either way
    decoy_hash: Arc<OnceCell<String>>,
}

impl PasswordService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            algorithm: config.password_algorithm,
            bcrypt_cost: config.bcrypt_cost,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Reject passwords the configured algorithm cannot hash in full
    pub fn check_input(&self, password: &str) -> std::result::Result<(), String> {
        match self.algorithm {
            PasswordAlgorithm::Bcrypt if password.len() > BCRYPT_MAX_PASSWORD_BYTES => Err(format!(
                "Password cannot exceed {} bytes",
                BCRYPT_MAX_PASSWORD_BYTES
            )),
            _ => Ok(()),
        }
    }

    /// Hash a password with the configured algorithm (blocking)
    pub fn hash(&self, password: &str) -> Result<String> {
        self.check_input(password).map_err(anyhow::Error::msg)?;
        match self.algorithm {
            PasswordAlgorithm::Bcrypt => bcrypt::hash(password, self.bcrypt_cost)
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e)),
            PasswordAlgorithm::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
                Ok(hash.to_string())
            }
        }
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored bcrypt or argon2 hash (blocking)
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        if hash.starts_with("$argon2") {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok())
        } else if hash.starts_with("$2") {
            bcrypt::verify(password, hash)
                .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
        } else {
            anyhow::bail!("Unrecognized password hash format")
        }
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Spend one verification's worth of work without a stored hash.
    ///
    /// Always resolves to `false`.
    pub async fn verify_decoy(&self, password: String) -> Result<bool> {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hash_async("balance-plus-decoy".to_string()))
            .await?
            .clone();
        Self::verify_async(password, decoy).await?;
        Ok(false)
    }
}
