//! Balance+ Shared Library
//!
//! This crate contains the domain models, wire types, validation rules and
//! date-key derivation shared by the backend service and the on-device client.

pub mod dates;
pub mod errors;
pub mod models;
pub mod stats;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use dates::{daily_log_key, DateRange, DAILY_LOG_KEY_PREFIX, MAX_RANGE_DAYS};
pub use errors::*;
pub use models::{Account, DailyLog, DailyLogFields, Healthiness, MoodEntry};
pub use stats::WeeklyStats;
pub use types::*;
