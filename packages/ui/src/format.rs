//! Display formatting for dates and hours.

use chrono::{Local, NaiveDate, NaiveDateTime};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `12/03/2024`, or a dash when unknown.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "—".to_string(),
    }
}

pub fn format_datetime(value: Option<NaiveDateTime>) -> String {
    match value {
        Some(v) => v.format("%d/%m/%Y %H:%M").to_string(),
        None => "—".to_string(),
    }
}

/// `7.5 h`, without a trailing `.0`.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.0} h")
    } else {
        format!("{hours:.1} h")
    }
}

/// `yyyy-mm-dd` value for `<input type="date">`.
pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Inverse of [`date_input_value`]; blank or malformed input is `None`.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 12);
        assert_eq!(format_date(d), "12/03/2024");
        assert_eq!(format_date(None), "—");
        assert_eq!(format_hours(8.0), "8 h");
        assert_eq!(format_hours(7.5), "7.5 h");
        assert_eq!(parse_date_input(&date_input_value(d)), d);
        assert_eq!(parse_date_input(""), None);
    }
}
