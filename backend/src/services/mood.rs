//! Mood entries

use crate::error::ApiError;
use crate::repositories::{MoodEntryRepository, NewMoodEntry};
use balance_plus_shared::dates::parse_date;
use balance_plus_shared::models::DEFAULT_MOOD_CATEGORY;
use balance_plus_shared::validation::{validate_category, validate_mood_value, validate_notes};
use balance_plus_shared::{CreateMoodEntryRequest, MoodEntry};
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

/// How many entries the history endpoint returns
pub const MOOD_HISTORY_LIMIT: i64 = 500;

/// Mood entry service
pub struct MoodService;

impl MoodService {
    /// Validate and append a mood entry
    pub async fn create(
        entries: &dyn MoodEntryRepository,
        user_id: Uuid,
        req: CreateMoodEntryRequest,
    ) -> Result<MoodEntry, ApiError> {
        let mood = validate_mood_value(req.mood).map_err(ApiError::Validation)?;

        let category = match req.category {
            Some(category) => {
                validate_category(&category).map_err(ApiError::Validation)?;
                category.trim().to_string()
            }
            None => DEFAULT_MOOD_CATEGORY.to_string(),
        };

        let notes = req.notes.filter(|n| !n.is_empty());
        if let Some(notes) = &notes {
            validate_notes(notes).map_err(ApiError::Validation)?;
        }

        let date = match req.date.as_deref() {
            Some(raw) => parse_entry_date(raw).map_err(ApiError::Validation)?,
            None => Utc::now(),
        };

        let entry = entries
            .create(NewMoodEntry {
                user_id,
                mood,
                category,
                notes,
                date,
            })
            .await?;

        debug!(user_id = %user_id, entry_id = %entry.id, "Mood entry created");
        Ok(entry)
    }

    /// Most recent entries, newest first
    pub async fn recent(
        entries: &dyn MoodEntryRepository,
        user_id: Uuid,
    ) -> Result<Vec<MoodEntry>, ApiError> {
        Ok(entries.recent(user_id, MOOD_HISTORY_LIMIT).await?)
    }
}

/// Parse an entry date: RFC 3339, or a bare `YYYY-MM-DD` taken as UTC midnight
pub fn parse_entry_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    parse_date(raw)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("Invalid date: {}", raw))
}
