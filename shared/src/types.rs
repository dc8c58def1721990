//! API request and response types
//!
//! Field names are camelCase on the wire to match the mobile app.

use crate::dates::strict_date;
use crate::errors::ErrorCode;
use crate::models::{DailyLog, DailyLogFields};
use crate::stats::WeeklyStats;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: ErrorCode,
}

// ============================================================================
// Authentication
// ============================================================================

/// Signup request
///
/// Missing fields deserialize as empty strings so they surface as
/// validation errors rather than body rejections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login response: bearer token plus the identity it was issued for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

/// Account profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Account deletion request; the password is re-checked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAccountRequest {
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Mood Entries
// ============================================================================

/// Mood entry creation request
///
/// `date` accepts RFC 3339 timestamps or plain `YYYY-MM-DD` (UTC midnight).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateMoodEntryRequest {
    pub mood: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

// ============================================================================
// Daily Logs
// ============================================================================

/// Body of a daily log save; the date comes from the path
pub type SaveDailyLogRequest = DailyLogFields;

/// One day of a range scan: the log, or an explicit "not found" marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<DailyLog>,
}

impl DayEntry {
    pub fn found(log: DailyLog) -> Self {
        Self {
            date: log.date,
            found: true,
            log: Some(log),
        }
    }

    pub fn missing(date: NaiveDate) -> Self {
        Self {
            date,
            found: false,
            log: None,
        }
    }
}

/// Range scan query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRangeQuery {
    #[serde(with = "strict_date")]
    pub start: NaiveDate,
    #[serde(with = "strict_date")]
    pub end: NaiveDate,
}

/// Weekly view query parameters; `end` defaults to today
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeekQuery {
    #[serde(default, with = "strict_date::option")]
    pub end: Option<NaiveDate>,
}

/// Seven ordered days plus their chart series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekResponse {
    pub days: Vec<DayEntry>,
    pub stats: WeeklyStats,
}

/// Bulk deletion query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLogsQuery {
    #[serde(with = "strict_date")]
    pub before: NaiveDate,
}

/// Bulk deletion result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLogsResponse {
    pub deleted: u64,
}
