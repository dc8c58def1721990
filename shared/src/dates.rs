//! Calendar-day keys and bounded date ranges
//!
//! A daily log belongs to the *local* wall-clock day on which it was made.
//! The key is always built from explicit year, month and day components,
//! never by slicing a UTC timestamp, so a log saved at 23:30 local time
//! lands on the same day everywhere it is read back.

use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// Prefix of every daily log entry in local key-value storage
pub const DAILY_LOG_KEY_PREFIX: &str = "dailyLog-";

/// Longest range a single scan may cover (one calendar month)
pub const MAX_RANGE_DAYS: i64 = 31;

/// Today's date on the local wall clock.
pub fn today_local() -> NaiveDate {
    local_date_of(&Local::now())
}

/// Calendar day of an instant, as seen in that instant's time zone.
pub fn local_date_of<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.naive_local().date()
}

/// Format as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a strict `YYYY-MM-DD` string.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let invalid = || format!("Invalid date '{}'. Use YYYY-MM-DD", value);
    if value.len() != 10 || !value.as_bytes()[..4].iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

/// Serde adapter holding a date to the same strict `YYYY-MM-DD` form as
/// [`parse_date`], for query strings.
pub mod strict_date {
    use super::{format_date, parse_date};
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(D::Error::custom)
    }

    /// Optional variant; absent stays `None`.
    pub mod option {
        use super::{format_date, parse_date};
        use chrono::NaiveDate;
        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_some(&format_date(*date)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| parse_date(&raw).map_err(D::Error::custom))
                .transpose()
        }
    }
}

/// Local storage key for a day, e.g. `dailyLog-2024-03-09`.
pub fn daily_log_key(date: NaiveDate) -> String {
    format!("{}{}", DAILY_LOG_KEY_PREFIX, format_date(date))
}

/// Inverse of [`daily_log_key`]; `None` for keys that are not daily logs.
pub fn parse_daily_log_key(key: &str) -> Option<NaiveDate> {
    key.strip_prefix(DAILY_LOG_KEY_PREFIX)
        .and_then(|rest| parse_date(rest).ok())
}

/// Inclusive, non-empty range of at most [`MAX_RANGE_DAYS`] days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting reversed or over-long spans.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err("Start date must not be after end date".to_string());
        }
        let days = (end - start).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(format!(
                "Date range cannot exceed {} days (got {})",
                MAX_RANGE_DAYS, days
            ));
        }
        Ok(Self { start, end })
    }

    /// The whole calendar month containing `year`/`month`.
    pub fn month(year: i32, month: u32) -> Result<Self, String> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| format!("Invalid month {}-{:02}", year, month))?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| format!("Invalid month {}-{:02}", year, month))?;
        Self::new(first, last)
    }

    /// `today - 6 ..= today`; fails only at the edge of the calendar.
    pub fn last_seven_days(today: NaiveDate) -> Result<Self, String> {
        let start = today
            .checked_sub_days(Days::new(6))
            .ok_or_else(|| format!("Date {} is out of range", today))?;
        Ok(Self { start, end: today })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, both ends included.
    pub fn len(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Always false; ranges hold at least one day.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every day in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.len())
    }
}
