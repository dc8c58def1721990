//! Daily log storage
//!
//! The log body is stored as one JSONB document per (owner, date). Saving
//! replaces the whole document, matching the client which always sends the
//! full form.

use super::DailyLogRepository;
use anyhow::Result;
use async_trait::async_trait;
use balance_plus_shared::{DailyLog, DailyLogFields};
use chrono::NaiveDate;
use sqlx::{types::Json, PgPool};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct DailyLogRecord {
    log_date: NaiveDate,
    payload: Json<DailyLogFields>,
}

impl From<DailyLogRecord> for DailyLog {
    fn from(record: DailyLogRecord) -> Self {
        DailyLog::new(record.log_date, record.payload.0)
    }
}

/// PostgreSQL daily log repository
pub struct PgDailyLogRepository {
    pool: PgPool,
}

impl PgDailyLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DailyLogRepository for PgDailyLogRepository {
    async fn upsert(
        &self,
        owner: Uuid,
        date: NaiveDate,
        fields: &DailyLogFields,
    ) -> Result<DailyLog> {
        let record = sqlx::query_as::<_, DailyLogRecord>(
            r#"
            INSERT INTO daily_logs (owner_id, log_date, payload)
            VALUES ($1, $2, $3)
            ON CONFLICT (owner_id, log_date)
            DO UPDATE SET payload = EXCLUDED.payload, updated_at = NOW()
            RETURNING log_date, payload
            "#,
        )
        .bind(owner)
        .bind(date)
        .bind(Json(fields))
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    async fn get(&self, owner: Uuid, date: NaiveDate) -> Result<Option<DailyLog>> {
        let record = sqlx::query_as::<_, DailyLogRecord>(
            r#"
            SELECT log_date, payload
            FROM daily_logs
            WHERE owner_id = $1 AND log_date = $2
            "#,
        )
        .bind(owner)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn list_range(
        &self,
        owner: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyLog>> {
        let records = sqlx::query_as::<_, DailyLogRecord>(
            r#"
            SELECT log_date, payload
            FROM daily_logs
            WHERE owner_id = $1 AND log_date BETWEEN $2 AND $3
            ORDER BY log_date ASC
            "#,
        )
        .bind(owner)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn delete_before(&self, owner: Uuid, date: NaiveDate) -> Result<u64> {
        let result = sqlx::query("DELETE FROM daily_logs WHERE owner_id = $1 AND log_date < $2")
            .bind(owner)
            .bind(date)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self, owner: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM daily_logs WHERE owner_id = $1")
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// In-memory daily log repository
#[derive(Default)]
pub struct MemoryDailyLogRepository {
    logs: RwLock<BTreeMap<(Uuid, NaiveDate), DailyLogFields>>,
}

impl MemoryDailyLogRepository {
    fn remove_where(
        logs: &mut BTreeMap<(Uuid, NaiveDate), DailyLogFields>,
        remove: impl Fn(&(Uuid, NaiveDate)) -> bool,
    ) -> u64 {
        let before = logs.len();
        logs.retain(|key, _| !remove(key));
        (before - logs.len()) as u64
    }
}

#[async_trait]
impl DailyLogRepository for MemoryDailyLogRepository {
    async fn upsert(
        &self,
        owner: Uuid,
        date: NaiveDate,
        fields: &DailyLogFields,
    ) -> Result<DailyLog> {
        self.logs
            .write()
            .await
            .insert((owner, date), fields.clone());
        Ok(DailyLog::new(date, fields.clone()))
    }

    async fn get(&self, owner: Uuid, date: NaiveDate) -> Result<Option<DailyLog>> {
        Ok(self
            .logs
            .read()
            .await
            .get(&(owner, date))
            .map(|fields| DailyLog::new(date, fields.clone())))
    }

    async fn list_range(
        &self,
        owner: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyLog>> {
        if start > end {
            return Ok(Vec::new());
        }

        Ok(self
            .logs
            .read()
            .await
            .range((owner, start)..=(owner, end))
            .map(|((_, date), fields)| DailyLog::new(*date, fields.clone()))
            .collect())
    }

    async fn delete_before(&self, owner: Uuid, date: NaiveDate) -> Result<u64> {
        let mut logs = self.logs.write().await;
        Ok(Self::remove_where(&mut logs, |(o, d)| *o == owner && *d < date))
    }

    async fn delete_all(&self, owner: Uuid) -> Result<u64> {
        let mut logs = self.logs.write().await;
        Ok(Self::remove_where(&mut logs, |(o, _)| *o == owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn fields(mood: i32) -> DailyLogFields {
        DailyLogFields {
            mood_rating: Some(mood),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_log() {
        let repo = MemoryDailyLogRepository::default();
        let owner = Uuid::new_v4();

        repo.upsert(owner, day(5), &fields(2)).await.unwrap();
        repo.upsert(owner, day(5), &fields(4)).await.unwrap();

        let log = repo.get(owner, day(5)).await.unwrap().unwrap();
        assert_eq!(log.fields.mood_rating, Some(4));
        assert_eq!(repo.list_range(owner, day(1), day(31)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_logs_are_scoped_to_owner() {
        let repo = MemoryDailyLogRepository::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.upsert(alice, day(5), &fields(2)).await.unwrap();

        assert!(repo.get(bob, day(5)).await.unwrap().is_none());
        assert!(repo.list_range(bob, day(1), day(31)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_range_is_inclusive_and_ordered() {
        let repo = MemoryDailyLogRepository::default();
        let owner = Uuid::new_v4();
        for d in [9, 3, 5, 1, 7] {
            repo.upsert(owner, day(d), &fields(3)).await.unwrap();
        }

        let dates: Vec<_> = repo
            .list_range(owner, day(3), day(7))
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.date)
            .collect();
        assert_eq!(dates, vec![day(3), day(5), day(7)]);
    }

    #[tokio::test]
    async fn test_delete_before_and_delete_all() {
        let repo = MemoryDailyLogRepository::default();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        for d in 1..=5 {
            repo.upsert(owner, day(d), &fields(3)).await.unwrap();
        }
        repo.upsert(other, day(1), &fields(3)).await.unwrap();

        assert_eq!(repo.delete_before(owner, day(3)).await.unwrap(), 2);
        assert!(repo.get(owner, day(2)).await.unwrap().is_none());
        assert!(repo.get(owner, day(3)).await.unwrap().is_some());
        assert!(repo.get(other, day(1)).await.unwrap().is_some());

        assert_eq!(repo.delete_all(owner).await.unwrap(), 3);
        assert_eq!(repo.delete_all(owner).await.unwrap(), 0);
    }
}
