//! Holiday data model
//!
//! `Holiday` and `CountryHolidayCount` are the types returned to callers.
//! `UpstreamHoliday` is the lenient wire record decoded from the holiday
//! provider; entries without a usable date never become a `Holiday`.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Length of a `YYYY-MM-DD` date on the wire
const DATE_LEN: usize = 10;

/// A public holiday observed on a single calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: NaiveDate,
    pub local_name: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, local_name: impl Into<String>) -> Self {
        Self {
            date,
            local_name: local_name.into(),
        }
    }

    /// True when the holiday falls on a Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// Number of non-weekend holidays for one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryHolidayCount {
    pub country_code: String,
    pub count: usize,
}

impl CountryHolidayCount {
    pub fn new(country_code: impl Into<String>, count: usize) -> Self {
        Self {
            country_code: country_code.into(),
            count,
        }
    }
}

/// Holiday record as returned by the upstream provider
///
/// Every field is optional and unknown fields are ignored, so a single
/// malformed entry does not fail the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamHoliday {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub local_name: Option<String>,
}

impl UpstreamHoliday {
    /// Convert into a `Holiday`, or `None` if the date is absent or invalid
    pub fn into_holiday(self) -> Option<Holiday> {
        let raw = self.date?;
        let raw = raw.trim();
        // ISO 8601 calendar date with zero-padded month and day only
        if raw.len() != DATE_LEN {
            return None;
        }
        let date = raw.parse::<NaiveDate>().ok()?;
        Some(Holiday {
            date,
            local_name: self.local_name.unwrap_or_default(),
        })
    }
}

/// Decode an upstream response body into holidays
///
/// An empty body or a JSON `null` means "no holidays known". Entries with
/// a missing or unparseable date are dropped.
pub fn decode_holidays(body: &str) -> serde_json::Result<Vec<Holiday>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Option<Vec<UpstreamHoliday>> = serde_json::from_str(body)?;
    Ok(records
        .unwrap_or_default()
        .into_iter()
        .filter_map(UpstreamHoliday::into_holiday)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_holiday_serializes_camel_case() {
        let holiday = Holiday::new(date(2025, 1, 1), "New Year's Day");
        let json = serde_json::to_value(&holiday).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"date": "2025-01-01", "localName": "New Year's Day"})
        );
    }

    #[test]
    fn test_country_count_serializes_camel_case() {
        let count = CountryHolidayCount::new("IN", 2);
        let json = serde_json::to_string(&count).unwrap();
        assert_eq!(json, r#"{"countryCode":"IN","count":2}"#);
    }

    #[test]
    fn test_is_weekend() {
        // 2025-01-04 is a Saturday, 2025-01-05 a Sunday
        assert!(Holiday::new(date(2025, 1, 4), "Sat").is_weekend());
        assert!(Holiday::new(date(2025, 1, 5), "Sun").is_weekend());
        assert!(!Holiday::new(date(2025, 1, 1), "Wed").is_weekend());
        assert!(!Holiday::new(date(2025, 1, 3), "Fri").is_weekend());
    }

    #[test]
    fn test_decode_drops_invalid_dates() {
        let body = r#"[
            {"date": "2025-01-01", "localName": "New Year's Day", "countryCode": "US"},
            {"date": null, "localName": "Nameless"},
            {"localName": "No date"},
            {"date": "2025-02-30", "localName": "Impossible"},
            {"date": "not-a-date", "localName": "Garbage"},
            {"date": "2025-12-25"}
        ]"#;

        let holidays = decode_holidays(body).unwrap();
        assert_eq!(
            holidays,
            vec![
                Holiday::new(date(2025, 1, 1), "New Year's Day"),
                Holiday::new(date(2025, 12, 25), ""),
            ]
        );
    }

    #[test]
    fn test_decode_requires_zero_padded_dates() {
        let body = r#"[
            {"date": "2025-1-1", "localName": "Unpadded"},
            {"date": "2025-01-1", "localName": "Half padded"},
            {"date": "+2025-01-01", "localName": "Signed year"},
            {"date": "2025-01-01T00:00:00", "localName": "With time"},
            {"date": " 2025-05-01 ", "localName": "Labour Day"}
        ]"#;

        let holidays = decode_holidays(body).unwrap();
        assert_eq!(holidays, vec![Holiday::new(date(2025, 5, 1), "Labour Day")]);
    }

    #[test]
    fn test_decode_empty_and_null_bodies() {
        assert!(decode_holidays("").unwrap().is_empty());
        assert!(decode_holidays("  \n").unwrap().is_empty());
        assert!(decode_holidays("null").unwrap().is_empty());
        assert!(decode_holidays("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_malformed_body_fails() {
        assert!(decode_holidays("<html>oops</html>").is_err());
        assert!(decode_holidays(r#"{"date": "2025-01-01"}"#).is_err());
    }
}
