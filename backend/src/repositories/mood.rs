//! Mood entry storage

use super::{MoodEntryRepository, NewMoodEntry};
use anyhow::Result;
use async_trait::async_trait;
use balance_plus_shared::MoodEntry;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct MoodEntryRecord {
    id: Uuid,
    user_id: Uuid,
    mood: i32,
    category: String,
    notes: Option<String>,
    entry_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MoodEntryRecord> for MoodEntry {
    fn from(record: MoodEntryRecord) -> Self {
        MoodEntry {
            id: record.id,
            user_id: record.user_id,
            mood: record.mood,
            category: record.category,
            notes: record.notes,
            date: record.entry_date,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// PostgreSQL mood entry repository
pub struct PgMoodEntryRepository {
    pool: PgPool,
}

impl PgMoodEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MoodEntryRepository for PgMoodEntryRepository {
    async fn create(&self, entry: NewMoodEntry) -> Result<MoodEntry> {
        let record = sqlx::query_as::<_, MoodEntryRecord>(
            r#"
            INSERT INTO mood_entries (user_id, mood, category, notes, entry_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, mood, category, notes, entry_date, created_at, updated_at
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.mood)
        .bind(&entry.category)
        .bind(&entry.notes)
        .bind(entry.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<MoodEntry>> {
        let records = sqlx::query_as::<_, MoodEntryRecord>(
            r#"
            SELECT id, user_id, mood, category, notes, entry_date, created_at, updated_at
            FROM mood_entries
            WHERE user_id = $1
            ORDER BY entry_date DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn delete_all(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM mood_entries WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// In-memory mood entry repository
#[derive(Default)]
pub struct MemoryMoodEntryRepository {
    entries: RwLock<Vec<MoodEntry>>,
}

#[async_trait]
impl MoodEntryRepository for MemoryMoodEntryRepository {
    async fn create(&self, entry: NewMoodEntry) -> Result<MoodEntry> {
        let now = Utc::now();
        let stored = MoodEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            mood: entry.mood,
            category: entry.category,
            notes: entry.notes,
            date: entry.date,
            created_at: now,
            updated_at: now,
        };

        self.entries.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<MoodEntry>> {
        let mut entries: Vec<MoodEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();

        entries.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        entries.truncate(limit.max(0) as usize);
        Ok(entries)
    }

    async fn delete_all(&self, user_id: Uuid) -> Result<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.user_id != user_id);
        Ok((before - entries.len()) as u64)
    }
}
