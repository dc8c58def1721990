//! Data models for the Balance+ application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    /// Always stored normalized (trimmed, lowercase)
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Self-assessed healthiness of the day's eating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Healthiness {
    Healthy,
    Moderate,
    Poor,
}

impl Healthiness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Healthiness::Healthy => "Healthy",
            Healthiness::Moderate => "Moderate",
            Healthiness::Poor => "Poor",
        }
    }
}

impl FromStr for Healthiness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Healthy" => Ok(Healthiness::Healthy),
            "Moderate" => Ok(Healthiness::Moderate),
            "Poor" => Ok(Healthiness::Poor),
            other => Err(format!(
                "Invalid healthiness '{}'. Valid options: Healthy, Moderate, Poor",
                other
            )),
        }
    }
}

/// Everything a user records about one day.
///
/// The JSON form is the exact blob the mobile app keeps under a
/// `dailyLog-YYYY-MM-DD` key, minus the date. Missing fields take their
/// empty value so partially filled forms still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyLogFields {
    pub mood_rating: Option<i32>,
    pub mood_feelings: Vec<String>,
    pub sleep_rating: Option<i32>,
    pub sleep_hours: f64,
    pub energy_rating: Option<i32>,
    pub steps: String,
    pub heart_rate: String,
    pub weight: String,
    pub hydration: i32,
    pub healthiness: Option<Healthiness>,
    #[serde(rename = "selectedSymptoms", alias = "symptoms")]
    pub symptoms: Vec<String>,
    pub notes: String,
}

impl DailyLogFields {
    /// Drop repeated feelings and symptoms, keeping first occurrences in order.
    pub fn normalized(mut self) -> Self {
        self.mood_feelings = dedup_preserving_order(self.mood_feelings);
        self.symptoms = dedup_preserving_order(self.symptoms);
        self
    }

    /// True when nothing at all was recorded.
    pub fn is_empty(&self) -> bool {
        *self == DailyLogFields::default()
    }
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// One user's wellness record for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub fields: DailyLogFields,
}

impl DailyLog {
    pub fn new(date: NaiveDate, fields: DailyLogFields) -> Self {
        Self { date, fields }
    }
}

/// A single timestamped mood rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: i32,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category assigned to mood entries that do not name one
pub const DEFAULT_MOOD_CATEGORY: &str = "Mood";
