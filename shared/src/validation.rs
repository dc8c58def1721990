//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Uses both custom validators and the `validator` crate.

use crate::models::DailyLogFields;
use validator::ValidateEmail;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum accepted password length, in characters like the minimum
pub const MAX_PASSWORD_LEN: usize = 128;

/// Upper bound for free-text notes
pub const MAX_NOTES_LEN: usize = 5000;

/// Upper bound for a mood entry category
pub const MAX_CATEGORY_LEN: usize = 64;

/// Canonical form of an email address: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email and password required".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    // Basic email regex check
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| format!("Email pattern error: {}", e))?;
    if !email_regex.is_match(email) || !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Email and password required".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    if password.chars().count() > MAX_PASSWORD_LEN {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate an optional 1-5 rating
pub fn validate_rating(field: &str, rating: Option<i32>) -> Result<(), String> {
    match rating {
        Some(value) if !(1..=5).contains(&value) => {
            Err(format!("{} must be between 1 and 5", field))
        }
        _ => Ok(()),
    }
}

/// Validate hours slept
pub fn validate_sleep_hours(hours: f64) -> Result<(), String> {
    if hours.is_nan() || hours.is_infinite() {
        return Err("Sleep hours must be a valid number".to_string());
    }
    if !(0.0..=24.0).contains(&hours) {
        return Err("Sleep hours must be between 0 and 24".to_string());
    }
    Ok(())
}

/// Validate the glasses-of-water counter
pub fn validate_hydration(glasses: i32) -> Result<(), String> {
    if glasses < 0 {
        return Err("Hydration cannot be negative".to_string());
    }
    if glasses > 100 {
        return Err("Hydration count unreasonably high".to_string());
    }
    Ok(())
}

/// Validate a free-form numeric text field (steps, heart rate, weight).
///
/// Empty means "not recorded". Anything else must parse as a
/// non-negative finite number.
pub fn validate_numeric_text(field: &str, value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(()),
        _ => Err(format!("{} must be a non-negative number", field)),
    }
}

/// Validate notes length
pub fn validate_notes(notes: &str) -> Result<(), String> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(format!("Notes cannot exceed {} characters", MAX_NOTES_LEN));
    }
    Ok(())
}

/// Validate every field of a daily log
pub fn validate_daily_log(fields: &DailyLogFields) -> Result<(), String> {
    validate_rating("Mood rating", fields.mood_rating)?;
    validate_rating("Sleep rating", fields.sleep_rating)?;
    validate_rating("Energy rating", fields.energy_rating)?;
    validate_sleep_hours(fields.sleep_hours)?;
    validate_hydration(fields.hydration)?;
    validate_numeric_text("Steps", &fields.steps)?;
    validate_numeric_text("Heart rate", &fields.heart_rate)?;
    validate_numeric_text("Weight", &fields.weight)?;
    validate_notes(&fields.notes)?;
    Ok(())
}

/// Validate a mood entry value and convert it to a whole rating.
///
/// The value must be present and a whole number between 1 and 5.
pub fn validate_mood_value(mood: Option<f64>) -> Result<i32, String> {
    let value = mood.ok_or_else(|| "mood (number) required".to_string())?;
    if value.is_nan() || value.is_infinite() || value.fract() != 0.0 {
        return Err("mood must be a whole number".to_string());
    }
    if !(1.0..=5.0).contains(&value) {
        return Err("mood must be between 1 and 5".to_string());
    }
    Ok(value as i32)
}

/// Validate a mood entry category
pub fn validate_category(category: &str) -> Result<(), String> {
    if category.trim().is_empty() {
        return Err("Category cannot be empty".to_string());
    }
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(format!(
            "Category cannot exceed {} characters",
            MAX_CATEGORY_LEN
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@domain.co.uk").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@dot").is_err());
        assert!(validate_email("spaces in@email.com").is_err());
    }

    #[test]
    fn test_generated_emails_are_valid() {
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            assert!(validate_email(&normalize_email(&email)).is_ok(), "{}", email);
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.com "), "a@x.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"a".repeat(129)).is_err());
        // Both bounds count characters, not bytes
        assert!(validate_password(&"é".repeat(128)).is_ok());
        assert!(validate_password(&"€".repeat(43)).is_ok());
        assert!(validate_password(&"€".repeat(129)).is_err());
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(1), true)]
    #[case(Some(5), true)]
    #[case(Some(0), false)]
    #[case(Some(6), false)]
    #[case(Some(-3), false)]
    fn test_validate_rating(#[case] rating: Option<i32>, #[case] ok: bool) {
        assert_eq!(validate_rating("Mood rating", rating).is_ok(), ok);
    }

    #[test]
    fn test_validate_sleep_hours() {
        assert!(validate_sleep_hours(0.0).is_ok());
        assert!(validate_sleep_hours(7.5).is_ok());
        assert!(validate_sleep_hours(24.0).is_ok());
        assert!(validate_sleep_hours(-0.5).is_err());
        assert!(validate_sleep_hours(25.0).is_err());
        assert!(validate_sleep_hours(f64::NAN).is_err());
    }

    #[rstest]
    #[case("", true)]
    #[case("  ", true)]
    #[case("8500", true)]
    #[case("72.5", true)]
    #[case("-1", false)]
    #[case("lots", false)]
    #[case("inf", false)]
    fn test_validate_numeric_text(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(validate_numeric_text("Steps", value).is_ok(), ok);
    }

    #[test]
    fn test_validate_daily_log_reports_first_bad_field() {
        let fields = DailyLogFields {
            energy_rating: Some(9),
            ..Default::default()
        };
        let err = validate_daily_log(&fields).unwrap_err();
        assert!(err.contains("Energy rating"));

        assert!(validate_daily_log(&DailyLogFields::default()).is_ok());
    }

    #[rstest]
    #[case(Some(3.0), Ok(3))]
    #[case(Some(1.0), Ok(1))]
    #[case(Some(2.5), Err(()))]
    #[case(Some(0.0), Err(()))]
    #[case(Some(6.0), Err(()))]
    #[case(None, Err(()))]
    fn test_validate_mood_value(#[case] mood: Option<f64>, #[case] expected: Result<i32, ()>) {
        assert_eq!(validate_mood_value(mood).map_err(|_| ()), expected);
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category("Mood").is_ok());
        assert!(validate_category("   ").is_err());
        assert!(validate_category(&"c".repeat(65)).is_err());
    }

    proptest! {
        #[test]
        fn prop_ratings_in_range_are_accepted(rating in 1i32..=5) {
            prop_assert!(validate_rating("Energy rating", Some(rating)).is_ok());
        }

        #[test]
        fn prop_ratings_out_of_range_are_rejected(rating in prop_oneof![i32::MIN..1, 6..i32::MAX]) {
            prop_assert!(validate_rating("Energy rating", Some(rating)).is_err());
        }

        #[test]
        fn prop_normalize_email_is_idempotent(email in "[ A-Za-z0-9@.]{0,40}") {
            let once = normalize_email(&email);
            prop_assert_eq!(normalize_email(&once), once.clone());
        }
    }
}
