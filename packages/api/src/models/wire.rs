//! Helpers shared by the per-entity normalization adapters.
//!
//! The backend is not consistent about how it spells enum values, dates and
//! references across endpoints. Everything that tolerates those variations
//! lives here so the canonical types stay plain.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

/// Backend identifier type.
pub type Id = i64;

/// Canonical key used to match enum spellings: upper-case, ASCII, `_` separated.
///
/// `"En cours"`, `"en-cours"` and `"EN_COURS"` all become `"EN_COURS"`;
/// a leading `ROLE_` prefix is dropped.
pub fn enum_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        let c = match c {
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' => 'E',
            'à' | 'â' | 'À' | 'Â' => 'A',
            'ç' | 'Ç' => 'C',
            'ô' | 'Ô' => 'O',
            'î' | 'ï' | 'Î' => 'I',
            'û' | 'ù' | 'Û' => 'U',
            '-' | ' ' | '.' => '_',
            other => other.to_ascii_uppercase(),
        };
        key.push(c);
    }
    match key.strip_prefix("ROLE_") {
        Some(rest) => rest.to_string(),
        None => key,
    }
}

/// Parse a date sent as `"2024-03-01"`, an ISO date-time, or a Jackson
/// `[2024, 3, 1]` array.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Array(parts) => {
            let year = parts.first()?.as_i64()?;
            let month = parts.get(1)?.as_u64()?;
            let day = parts.get(2)?.as_u64()?;
            NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    parse_datetime_str(s).map(|dt| dt.date())
}

/// Parse a timestamp sent as an ISO string (with or without offset) or a
/// Jackson `[y, m, d, h, min, s]` array.
pub fn parse_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_datetime_str(s.trim())
            .or_else(|| parse_date_str(s).and_then(|d| d.and_hms_opt(0, 0, 0))),
        Value::Array(parts) => {
            let date = parse_date(value)?;
            let field = |i: usize| parts.get(i).and_then(Value::as_u64).unwrap_or(0) as u32;
            date.and_hms_opt(field(3), field(4), field(5))
        }
        _ => None,
    }
}

fn parse_datetime_str(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Optional date field.
pub fn opt_date(value: &Option<Value>) -> Option<NaiveDate> {
    value.as_ref().and_then(parse_date)
}

/// Optional timestamp field.
pub fn opt_datetime(value: &Option<Value>) -> Option<NaiveDateTime> {
    value.as_ref().and_then(parse_datetime)
}

/// Read a number that may arrive as a JSON number or a numeric string.
pub fn lenient_f64(value: &Option<Value>) -> Option<f64> {
    match value.as_ref()? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

/// Drop blank strings.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// A list endpoint may answer with a bare array, a Spring `Page`
/// (`content`), or a `{ "data": [...] }` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Page { content: Vec<T> },
    Data { data: Vec<T> },
    Items { items: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items)
            | ListEnvelope::Page { content: items }
            | ListEnvelope::Data { data: items }
            | ListEnvelope::Items { items } => items,
        }
    }
}

/// Conversion from a tolerant wire DTO into a canonical model.
///
/// Every entity has exactly one implementation; the API client applies it
/// immediately after decoding a response body.
pub trait FromWire: Sized {
    type Raw: serde::de::DeserializeOwned;

    fn from_wire(raw: Self::Raw) -> Result<Self, String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_key_variants() {
        assert_eq!(enum_key("En cours"), "EN_COURS");
        assert_eq!(enum_key("en-cours"), "EN_COURS");
        assert_eq!(enum_key("ROLE_ADMIN"), "ADMIN");
        assert_eq!(enum_key(" Terminée "), "TERMINEE");
        assert_eq!(enum_key("développeur"), "DEVELOPPEUR");
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date(&json!("2024-03-01")), Some(expected));
        assert_eq!(parse_date(&json!("2024-03-01T09:30:00")), Some(expected));
        assert_eq!(parse_date(&json!("2024-03-01T09:30:00Z")), Some(expected));
        assert_eq!(parse_date(&json!([2024, 3, 1])), Some(expected));
        assert_eq!(parse_date(&json!("")), None);
        assert_eq!(parse_date(&json!(12)), None);
    }

    #[test]
    fn test_parse_datetime_array() {
        let dt = parse_datetime(&json!([2024, 3, 1, 14, 5, 9])).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-01 14:05:09");
    }

    #[test]
    fn test_lenient_f64() {
        assert_eq!(lenient_f64(&Some(json!(42.5))), Some(42.5));
        assert_eq!(lenient_f64(&Some(json!("80 %"))), Some(80.0));
        assert_eq!(lenient_f64(&Some(json!(null))), None);
        assert_eq!(lenient_f64(&None), None);
    }

    #[test]
    fn test_list_envelopes() {
        let bare: ListEnvelope<u32> = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2]);
        let page: ListEnvelope<u32> =
            serde_json::from_value(json!({ "content": [3], "totalElements": 1 })).unwrap();
        assert_eq!(page.into_vec(), vec![3]);
        let data: ListEnvelope<u32> = serde_json::from_value(json!({ "data": [] })).unwrap();
        assert!(data.into_vec().is_empty());
    }
}
