//! Conversions between form date strings and backend unix timestamps.
//!
//! The backend stores dates as unix seconds; forms and rows show `MM/DD/YYYY`.

use chrono::{DateTime, NaiveDate};

/// Display format used by rows and the date inputs.
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y";

/// Parse `MM/DD/YYYY` into a UTC-midnight unix timestamp. Empty or invalid input yields `0`.
///
/// Forms send display dates and the backend does this conversion itself; this is the
/// client-side counterpart of [`from_timestamp`] for callers that need the stored value.
pub fn to_timestamp(text: &str) -> i64 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }
    match NaiveDate::parse_from_str(text, DISPLAY_FORMAT) {
        Ok(date) => date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp()).unwrap_or(0),
        Err(_) => 0,
    }
}

/// Render a unix timestamp as `MM/DD/YYYY` (UTC). `0` renders as an empty string.
pub fn from_timestamp(timestamp: i64) -> String {
    if timestamp == 0 {
        return String::new();
    }
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parse date input flexibly, accepting multiple formats.
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for fmt in &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", DISPLAY_FORMAT] {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }
    None
}

/// Normalize a date input to the display format. Empty stays empty.
pub fn normalize_date_input(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        return Some(String::new());
    }
    parse_flexible_date(input).map(|d| d.format(DISPLAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_timestamp() {
        assert_eq!(to_timestamp("01/02/2018"), 1_514_851_200);
        assert_eq!(to_timestamp(""), 0);
        assert_eq!(to_timestamp("2018-01-02"), 0);
        assert_eq!(to_timestamp("13/45/2018"), 0);
    }

    #[test]
    fn test_from_timestamp() {
        assert_eq!(from_timestamp(1_514_851_200), "01/02/2018");
        assert_eq!(from_timestamp(0), "");
    }

    #[test]
    fn test_parse_flexible_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 25);
        assert_eq!(parse_flexible_date("2025-11-25"), expected);
        assert_eq!(parse_flexible_date("2025/11/25"), expected);
        assert_eq!(parse_flexible_date("2025.11.25"), expected);
        assert_eq!(parse_flexible_date(" 11/25/2025 "), expected);
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("yesterday"), None);
    }

    #[test]
    fn test_normalize_date_input() {
        assert_eq!(normalize_date_input("2025-11-25").as_deref(), Some("11/25/2025"));
        assert_eq!(normalize_date_input("").as_deref(), Some(""));
        assert_eq!(normalize_date_input("soon"), None);
    }
}
