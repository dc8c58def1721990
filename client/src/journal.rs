//! On-device daily log journal
//!
//! Each day lives under its own `dailyLog-YYYY-MM-DD` key, the value being
//! the serialized [`DailyLog`]. Range reads mirror the server: one entry per
//! day with explicit placeholders for days nothing was saved.

use crate::error::ClientResult;
use crate::storage::KeyValueStore;
use balance_plus_shared::dates::parse_daily_log_key;
use balance_plus_shared::validation::validate_daily_log;
use balance_plus_shared::{
    daily_log_key, DailyLog, DailyLogFields, DateRange, DayEntry, RecordError, WeekResponse,
    WeeklyStats,
};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct LocalJournal {
    store: Arc<dyn KeyValueStore>,
}

impl LocalJournal {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Validate and write the log for `date`, replacing any previous one
    pub async fn save(&self, date: NaiveDate, fields: DailyLogFields) -> ClientResult<DailyLog> {
        let fields = fields.normalized();
        validate_daily_log(&fields).map_err(RecordError::Invalid)?;

        let log = DailyLog::new(date, fields);
        self.store
            .set(&daily_log_key(date), serde_json::to_string(&log)?)
            .await?;
        debug!(date = %date, "Saved daily log locally");
        Ok(log)
    }

    pub async fn get(&self, date: NaiveDate) -> ClientResult<Option<DailyLog>> {
        match self.store.get(&daily_log_key(date)).await? {
            Some(raw) => {
                let mut log: DailyLog = serde_json::from_str(&raw)?;
                // The key is authoritative for the date
                log.date = date;
                Ok(Some(log))
            }
            None => Ok(None),
        }
    }

    /// One entry per day of `range`, ascending
    pub async fn list(&self, range: DateRange) -> ClientResult<Vec<DayEntry>> {
        let mut days = Vec::with_capacity(range.len());
        for day in range.days() {
            days.push(match self.get(day).await? {
                Some(log) => DayEntry::found(log),
                None => DayEntry::missing(day),
            });
        }
        Ok(days)
    }

    pub async fn month(&self, year: i32, month: u32) -> ClientResult<Vec<DayEntry>> {
        let range = DateRange::month(year, month).map_err(RecordError::InvalidRange)?;
        self.list(range).await
    }

    /// The seven days ending on `today`, with their chart series
    pub async fn last_seven_days(&self, today: NaiveDate) -> ClientResult<WeekResponse> {
        let range = DateRange::last_seven_days(today).map_err(RecordError::InvalidRange)?;
        let days = self.list(range).await?;
        let stats = WeeklyStats::from_entries(&days);
        Ok(WeekResponse { days, stats })
    }

    /// Day-of-month numbers that have a saved log, for calendar markers
    pub async fn logged_days_in_month(&self, year: i32, month: u32) -> ClientResult<BTreeSet<u32>> {
        let range = DateRange::month(year, month).map_err(RecordError::InvalidRange)?;
        Ok(self
            .store
            .keys()
            .await?
            .iter()
            .filter_map(|key| parse_daily_log_key(key))
            .filter(|date| range.contains(*date))
            .map(|date| date.day())
            .collect())
    }

    /// Remove every log strictly before `before`
    pub async fn delete_before(&self, before: NaiveDate) -> ClientResult<u64> {
        let stale: Vec<String> = self
            .store
            .keys()
            .await?
            .into_iter()
            .filter(|key| matches!(parse_daily_log_key(key), Some(date) if date < before))
            .collect();

        if stale.is_empty() {
            return Ok(0);
        }

        if let Err(e) = self.store.remove_many(&stale).await {
            warn!(error = %e, "Failed to delete past daily logs");
            return Err(e);
        }

        info!(before = %before, deleted = stale.len(), "Deleted past daily logs locally");
        Ok(stale.len() as u64)
    }
}
