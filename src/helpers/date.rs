//! Date helper functions

use chrono::{DateTime, Utc};

use crate::content::parse_date_string;

/// Default display pattern for post dates
pub const DEFAULT_DATE_FORMAT: &str = "yyyy年MM月dd日";

/// Format a date string using a date-fns style pattern.
/// Strings that are not dates are returned unchanged.
///
/// # Examples
/// ```ignore
/// format_date("2024-01-15T00:00:00.000Z", "yyyy-MM-dd") // -> "2024-01-15"
/// ```
pub fn format_date(date: &str, format: &str) -> String {
    match parse_date_string(date) {
        Some(dt) => format_date_time(&dt, format),
        None => date.to_string(),
    }
}

/// Format a timestamp using a date-fns style pattern
pub fn format_date_time(date: &DateTime<Utc>, format: &str) -> String {
    let chrono_format = date_fns_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Whole days elapsed from `date` to `now` (absolute)
pub fn days_between(date: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
    now.signed_duration_since(*date).num_days().abs()
}

/// Label for the "since last update" statistic
pub fn days_since_label(days: Option<i64>) -> String {
    match days {
        None => "N/A".to_string(),
        Some(0) => "今天".to_string(),
        Some(1) => "1 天".to_string(),
        Some(n) => format!("{} 天", n),
    }
}

/// Convert date-fns format tokens to chrono format
fn date_fns_to_chrono_format(format: &str) -> String {
    let mut result = String::with_capacity(format.len() * 2);
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            result.push_str("%%");
            continue;
        }

        // Tokens are runs of one letter, e.g. `yyyy` or `d`
        let mut len = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            len += 1;
        }

        match date_fns_token(c, len) {
            Some(spec) => result.push_str(spec),
            None => result.extend(std::iter::repeat(c).take(len)),
        }
    }

    result
}

fn date_fns_token(letter: char, len: usize) -> Option<&'static str> {
    let spec = match (letter, len) {
        ('y', 4) => "%Y",
        ('y', 2) => "%y",
        ('M', 4) => "%B",
        ('M', 3) => "%b",
        ('M', 2) => "%m",
        ('M', 1) => "%-m",
        ('d', 2) => "%d",
        ('d', 1) => "%-d",
        ('H', 2) => "%H",
        ('H', 1) => "%-H",
        ('h', 2) => "%I",
        ('h', 1) => "%-I",
        ('m', 2) => "%M",
        ('m', 1) => "%-M",
        ('s', 2) => "%S",
        ('s', 1) => "%-S",
        ('E', 4) => "%A",
        ('E', 3) => "%a",
        ('S', 3) => "%3f",
        _ => return None,
    };
    Some(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date("2024-01-15T00:00:00.000Z", DEFAULT_DATE_FORMAT),
            "2024年01月15日"
        );
        assert_eq!(format_date("2024-01-15", "yyyy/MM/dd"), "2024/01/15");
        assert_eq!(
            format_date("2024-01-15 10:30:00", "yyyy-MM-dd HH:mm"),
            "2024-01-15 10:30"
        );
    }

    #[test]
    fn test_format_invalid_date_unchanged() {
        assert_eq!(format_date("someday", DEFAULT_DATE_FORMAT), "someday");
    }

    #[test]
    fn test_date_fns_to_chrono() {
        assert_eq!(date_fns_to_chrono_format("yyyy-MM-dd"), "%Y-%m-%d");
        assert_eq!(date_fns_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(date_fns_to_chrono_format("100%"), "100%%");
        assert_eq!(date_fns_to_chrono_format("M月d日 H:mm"), "%-m月%-d日 %-H:%M");
    }

    #[test]
    fn test_format_date_single_letter_tokens() {
        assert_eq!(format_date("2024-03-05T08:07:00.000Z", "M月d日"), "3月5日");
        assert_eq!(format_date("2024-03-05T08:07:00.000Z", "yyyy/M/d H:mm"), "2024/3/5 8:07");
    }

    #[test]
    fn test_days_between() {
        let posted = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 11, 0, 0).unwrap();
        assert_eq!(days_between(&posted, &now), 9);
        assert_eq!(days_between(&now, &posted), 9);
    }

    #[test]
    fn test_days_since_label() {
        assert_eq!(days_since_label(None), "N/A");
        assert_eq!(days_since_label(Some(0)), "今天");
        assert_eq!(days_since_label(Some(1)), "1 天");
        assert_eq!(days_since_label(Some(12)), "12 天");
    }
}
