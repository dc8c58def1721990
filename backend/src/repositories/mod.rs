//! Data access layer
//!
//! Each store is a trait with a PostgreSQL implementation and an in-memory
//! one. The in-memory stores back the test suite and `backend = "memory"`
//! deployments; both honor the same uniqueness rules.

use anyhow::Result;
use async_trait::async_trait;
use balance_plus_shared::{Account, DailyLog, DailyLogFields, MoodEntry};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub mod account;
pub mod daily_log;
pub mod mood;

pub use account::{MemoryAccountRepository, PgAccountRepository};
pub use daily_log::{MemoryDailyLogRepository, PgDailyLogRepository};
pub use mood::{MemoryMoodEntryRepository, PgMoodEntryRepository};

/// Account storage. Emails are stored already normalized.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert an account; `None` when the email is already taken.
    async fn create(&self, email: &str, password_hash: &str) -> Result<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    async fn email_exists(&self, email: &str) -> Result<bool>;

    /// Returns `false` when the account does not exist.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool>;

    /// Returns `false` when the account does not exist. In PostgreSQL the
    /// account's logs and mood entries go with it through foreign keys.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Daily logs keyed by (owner, date). At most one log per key.
#[async_trait]
pub trait DailyLogRepository: Send + Sync {
    /// Insert or fully replace the log for `date`.
    async fn upsert(&self, owner: Uuid, date: NaiveDate, fields: &DailyLogFields)
        -> Result<DailyLog>;

    async fn get(&self, owner: Uuid, date: NaiveDate) -> Result<Option<DailyLog>>;

    /// Existing logs in `start..=end`, ascending by date.
    async fn list_range(&self, owner: Uuid, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<DailyLog>>;

    /// Delete logs strictly before `date`; returns how many went.
    async fn delete_before(&self, owner: Uuid, date: NaiveDate) -> Result<u64>;

    async fn delete_all(&self, owner: Uuid) -> Result<u64>;
}

/// Validated input for a new mood entry
#[derive(Debug, Clone)]
pub struct NewMoodEntry {
    pub user_id: Uuid,
    pub mood: i32,
    pub category: String,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
}

/// Append-only mood entries
#[async_trait]
pub trait MoodEntryRepository: Send + Sync {
    async fn create(&self, entry: NewMoodEntry) -> Result<MoodEntry>;

    /// Newest first by entry date, at most `limit` entries.
    async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<MoodEntry>>;

    async fn delete_all(&self, user_id: Uuid) -> Result<u64>;
}

/// The full set of stores handed to services
#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub daily_logs: Arc<dyn DailyLogRepository>,
    pub mood_entries: Arc<dyn MoodEntryRepository>,
    pool: Option<PgPool>,
}

impl Repositories {
    /// PostgreSQL-backed stores sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            accounts: Arc::new(PgAccountRepository::new(pool.clone())),
            daily_logs: Arc::new(PgDailyLogRepository::new(pool.clone())),
            mood_entries: Arc::new(PgMoodEntryRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Process-local stores, empty at start
    pub fn memory() -> Self {
        Self {
            accounts: Arc::new(MemoryAccountRepository::default()),
            daily_logs: Arc::new(MemoryDailyLogRepository::default()),
            mood_entries: Arc::new(MemoryMoodEntryRepository::default()),
            pool: None,
        }
    }

    /// Delete an account and everything it owns.
    ///
    /// PostgreSQL removes the records in the same statement through
    /// `ON DELETE CASCADE`. The in-memory stores are only cleared once the
    /// account itself is gone, so a failed delete leaves all data in place.
    pub async fn delete_account(&self, id: Uuid) -> Result<bool> {
        if !self.accounts.delete(id).await? {
            return Ok(false);
        }
        if self.pool.is_none() {
            self.daily_logs.delete_all(id).await?;
            self.mood_entries.delete_all(id).await?;
        }
        Ok(true)
    }

    /// Database pool, when running against PostgreSQL
    #[inline]
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }
}
