//! Client-side form validation.
//!
//! Drafts sent to the backend are checked here first. A failing check blocks
//! the request entirely; the UI shows each [`FieldError`] next to its input.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 .\-]{7,17}$").expect("valid phone regex"));

/// Minimum password length accepted for new accounts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// One failed check, keyed by form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All failed checks of a form, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// First message recorded for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Field is present and not blank.
    pub fn require(&mut self, field: &'static str, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, format!("{label} is required"));
            false
        } else {
            true
        }
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if self.require(field, "Email", value) && !is_valid_email(value) {
            self.add(field, "Enter a valid email address");
        }
    }

    /// Optional phone number; blank passes.
    pub fn phone(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(phone) = value.map(str::trim).filter(|p| !p.is_empty()) {
            if !is_valid_phone(phone) {
                self.add(field, "Enter a valid phone number");
            }
        }
    }

    /// `end` must not precede `start` when both are set.
    pub fn date_order(&mut self, field: &'static str, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                self.add(field, "End date must be on or after the start date");
            }
        }
    }

    pub fn non_negative(&mut self, field: &'static str, label: &str, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.add(field, format!("{label} cannot be negative"));
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_regex() {
        assert!(is_valid_email("lead@example.com"));
        assert!(is_valid_email(" a.b+c@sub.example.org "));
        assert!(!is_valid_email("lead@example"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_phone_regex() {
        assert!(is_valid_phone("+216 22 333 444"));
        assert!(is_valid_phone("0612345678"));
        assert!(!is_valid_phone("12ab"));
        assert!(!is_valid_phone("123"));
    }

    #[test]
    fn test_collects_errors_in_order() {
        let mut errors = ValidationErrors::new();
        errors.require("title", "Title", "   ");
        errors.email("email", "bad");
        errors.phone("phone", Some(""));
        errors.date_order(
            "end_date",
            NaiveDate::from_ymd_opt(2024, 5, 2),
            NaiveDate::from_ymd_opt(2024, 5, 1),
        );
        errors.non_negative("planned_hours", "Planned hours", -1.0);

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.for_field("title"), Some("Title is required"));
        assert_eq!(errors.for_field("email"), Some("Enter a valid email address"));
        assert!(errors.for_field("phone").is_none());
        assert!(errors.clone().into_result().is_err());
    }

    #[test]
    fn test_same_day_dates_are_valid() {
        let mut errors = ValidationErrors::new();
        let day = NaiveDate::from_ymd_opt(2024, 5, 1);
        errors.date_order("end_date", day, day);
        errors.date_order("end_date", None, day);
        assert!(errors.into_result().is_ok());
    }
}
