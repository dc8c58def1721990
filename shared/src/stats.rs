//! Seven-day chart series
//!
//! The stats screen plots mood, sleep hours and energy for the last seven
//! days. Days without a log plot as gaps (`None`), and averages only count
//! the days that have a value.

use crate::types::DayEntry;
use serde::{Deserialize, Serialize};

/// Per-day series and averages for a run of consecutive days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    /// Single-letter weekday labels, oldest first ("M", "T", ...)
    pub labels: Vec<String>,
    pub mood: Vec<Option<i32>>,
    pub sleep_hours: Vec<Option<f64>>,
    pub energy: Vec<Option<i32>>,
    pub average_mood: Option<f64>,
    pub average_sleep_hours: Option<f64>,
    pub average_energy: Option<f64>,
    pub logged_days: usize,
}

impl WeeklyStats {
    /// Build the series from entries already ordered by date.
    pub fn from_entries(entries: &[DayEntry]) -> Self {
        let labels = entries
            .iter()
            .map(|e| e.date.format("%a").to_string().chars().take(1).collect())
            .collect();

        let logs: Vec<_> = entries.iter().map(|e| e.log.as_ref()).collect();
        let mood: Vec<Option<i32>> = logs
            .iter()
            .map(|l| l.and_then(|l| l.fields.mood_rating))
            .collect();
        let sleep_hours: Vec<Option<f64>> = logs
            .iter()
            .map(|l| l.map(|l| l.fields.sleep_hours))
            .collect();
        let energy: Vec<Option<i32>> = logs
            .iter()
            .map(|l| l.and_then(|l| l.fields.energy_rating))
            .collect();

        Self {
            labels,
            average_mood: average(mood.iter().flatten().map(|v| *v as f64)),
            average_sleep_hours: average(sleep_hours.iter().flatten().copied()),
            average_energy: average(energy.iter().flatten().map(|v| *v as f64)),
            logged_days: entries.iter().filter(|e| e.found).count(),
            mood,
            sleep_hours,
            energy,
        }
    }
}

/// Arithmetic mean, `None` for an empty input.
pub fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
