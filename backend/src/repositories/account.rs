//! Account storage

use super::AccountRepository;
use anyhow::Result;
use async_trait::async_trait;
use balance_plus_shared::Account;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Account row
#[derive(Debug, Clone, sqlx::FromRow)]
struct AccountRecord {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Account {
            id: record.id,
            email: record.email,
            password_hash: record.password_hash,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// PostgreSQL account repository
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, email: &str, password_hash: &str) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, AccountRecord>(
            r#"
            INSERT INTO accounts (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(record) => Ok(Some(record.into())),
            // Lost a race with a concurrent signup for the same email
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let record = sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let record = sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Default)]
struct AccountTable {
    by_id: HashMap<Uuid, Account>,
    by_email: HashMap<String, Uuid>,
}

/// In-memory account repository
#[derive(Default)]
pub struct MemoryAccountRepository {
    table: RwLock<AccountTable>,
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, email: &str, password_hash: &str) -> Result<Option<Account>> {
        // Check and insert under one write lock so concurrent signups serialize
        let mut table = self.table.write().await;
        if table.by_email.contains_key(email) {
            return Ok(None);
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };

        table.by_email.insert(account.email.clone(), account.id);
        table.by_id.insert(account.id, account.clone());
        Ok(Some(account))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let table = self.table.read().await;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.table.read().await.by_id.get(&id).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.table.read().await.by_email.contains_key(email))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool> {
        let mut table = self.table.write().await;
        match table.by_id.get_mut(&id) {
            Some(account) => {
                account.password_hash = password_hash.to_string();
                account.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut table = self.table.write().await;
        match table.by_id.remove(&id) {
            Some(account) => {
                table.by_email.remove(&account.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryAccountRepository::default();
        let account = repo.create("a@x.com", "$2b$hash").await.unwrap().unwrap();

        let by_email = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        let by_id = repo.find_by_id(account.id).await.unwrap().unwrap();

        assert_eq!(by_email.id, account.id);
        assert_eq!(by_id.email, "a@x.com");
        assert!(repo.email_exists("a@x.com").await.unwrap());
        assert!(!repo.email_exists("b@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = MemoryAccountRepository::default();
        assert!(repo.create("a@x.com", "h1").await.unwrap().is_some());
        assert!(repo.create("a@x.com", "h2").await.unwrap().is_none());

        let account = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(account.password_hash, "h1");
    }

    #[tokio::test]
    async fn test_concurrent_signups_yield_one_account() {
        let repo = Arc::new(MemoryAccountRepository::default());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create("race@x.com", "h").await.unwrap() })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_update_password_and_delete() {
        let repo = MemoryAccountRepository::default();
        let account = repo.create("a@x.com", "old").await.unwrap().unwrap();

        assert!(repo.update_password(account.id, "new").await.unwrap());
        let updated = repo.find_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(updated.password_hash, "new");
        assert!(updated.updated_at >= account.updated_at);

        assert!(repo.delete(account.id).await.unwrap());
        assert!(!repo.delete(account.id).await.unwrap());
        assert!(!repo.email_exists("a@x.com").await.unwrap());
        assert!(!repo.update_password(account.id, "x").await.unwrap());
    }
}
