//! Record store: one daily log per (owner, date)
//!
//! Range reads return one entry per calendar day, with explicit "not found"
//! placeholders, so callers never have to fill gaps themselves.

use crate::error::ApiError;
use crate::repositories::DailyLogRepository;
use balance_plus_shared::validation::validate_daily_log;
use balance_plus_shared::{
    DailyLog, DailyLogFields, DateRange, DayEntry, RecordError, WeekResponse, WeeklyStats,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Daily log service
pub struct DailyLogService;

impl DailyLogService {
    /// Validate and store the log for `date`, replacing any previous one
    pub async fn save_log(
        logs: &dyn DailyLogRepository,
        owner: Uuid,
        date: NaiveDate,
        fields: DailyLogFields,
    ) -> Result<DailyLog, ApiError> {
        let fields = fields.normalized();
        validate_daily_log(&fields).map_err(RecordError::Invalid)?;

        let log = logs.upsert(owner, date, &fields).await?;
        debug!(user_id = %owner, date = %date, "Daily log saved");
        Ok(log)
    }

    /// Point lookup; `NotFound` when nothing was saved for the day
    pub async fn get_log(
        logs: &dyn DailyLogRepository,
        owner: Uuid,
        date: NaiveDate,
    ) -> Result<DailyLog, ApiError> {
        logs.get(owner, date)
            .await?
            .ok_or_else(|| RecordError::NotFound(date).into())
    }

    /// One entry per day of `range`, ascending
    pub async fn list_logs(
        logs: &dyn DailyLogRepository,
        owner: Uuid,
        range: DateRange,
    ) -> Result<Vec<DayEntry>, ApiError> {
        let mut stored: HashMap<NaiveDate, DailyLog> = logs
            .list_range(owner, range.start(), range.end())
            .await?
            .into_iter()
            .map(|log| (log.date, log))
            .collect();

        Ok(range
            .days()
            .map(|day| match stored.remove(&day) {
                Some(log) => DayEntry::found(log),
                None => DayEntry::missing(day),
            })
            .collect())
    }

    /// `list_logs` over `start..=end` after checking the bounds
    pub async fn list_between(
        logs: &dyn DailyLogRepository,
        owner: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayEntry>, ApiError> {
        let range = DateRange::new(start, end).map_err(RecordError::InvalidRange)?;
        Self::list_logs(logs, owner, range).await
    }

    /// Every day of a calendar month
    pub async fn month(
        logs: &dyn DailyLogRepository,
        owner: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<DayEntry>, ApiError> {
        let range = DateRange::month(year, month).map_err(RecordError::InvalidRange)?;
        Self::list_logs(logs, owner, range).await
    }

    /// The seven days ending on `today`, with their chart series
    pub async fn last_seven_days(
        logs: &dyn DailyLogRepository,
        owner: Uuid,
        today: NaiveDate,
    ) -> Result<WeekResponse, ApiError> {
        let range = DateRange::last_seven_days(today).map_err(RecordError::InvalidRange)?;
        let days = Self::list_logs(logs, owner, range).await?;
        let stats = WeeklyStats::from_entries(&days);
        Ok(WeekResponse { days, stats })
    }

    /// Delete every log strictly before `before`
    pub async fn delete_before(
        logs: &dyn DailyLogRepository,
        owner: Uuid,
        before: NaiveDate,
    ) -> Result<u64, ApiError> {
        let deleted = logs.delete_before(owner, before).await?;
        info!(user_id = %owner, before = %before, deleted, "Deleted past daily logs");
        Ok(deleted)
    }
}
