//! Cached login session
//!
//! The token, user id and email are stored as three separate entries. A
//! session only loads when all three are present.

use crate::error::ClientResult;
use crate::storage::KeyValueStore;
use std::sync::Arc;

pub const TOKEN_KEY: &str = "@auth_token";
pub const USER_ID_KEY: &str = "@auth_user_id";
pub const EMAIL_KEY: &str = "@auth_email";

/// A signed-in session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

#[derive(Clone)]
pub struct SessionCache {
    store: Arc<dyn KeyValueStore>,
}

impl SessionCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn store(&self, session: &Session) -> ClientResult<()> {
        self.store.set(TOKEN_KEY, session.token.clone()).await?;
        self.store.set(USER_ID_KEY, session.user_id.clone()).await?;
        self.store.set(EMAIL_KEY, session.email.clone()).await?;
        Ok(())
    }

    pub async fn load(&self) -> ClientResult<Option<Session>> {
        let token = self.store.get(TOKEN_KEY).await?;
        let user_id = self.store.get(USER_ID_KEY).await?;
        let email = self.store.get(EMAIL_KEY).await?;

        Ok(match (token, user_id, email) {
            (Some(token), Some(user_id), Some(email)) => Some(Session {
                token,
                user_id,
                email,
            }),
            _ => None,
        })
    }

    /// Cached token alone, if a full session is present
    pub async fn token(&self) -> ClientResult<Option<String>> {
        Ok(self.load().await?.map(|s| s.token))
    }

    pub async fn clear(&self) -> ClientResult<()> {
        self.store
            .remove_many(&[
                TOKEN_KEY.to_string(),
                USER_ID_KEY.to_string(),
                EMAIL_KEY.to_string(),
            ])
            .await
    }
}
