//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

const DELIMITER: &str = "---";

/// Metadata header of a post, kept loosely typed.
///
/// Fields are raw YAML values so that a wrongly typed field degrades to its
/// default instead of rejecting the whole header.
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    pub title: Option<Value>,
    pub date: Option<Value>,
    pub tags: Option<Value>,
    pub summary: Option<Value>,

    /// Additional custom fields, in header order
    pub extra: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some((header, body)) = split_header(content) else {
            return (FrontMatter::default(), content);
        };

        if header.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        // A pair of markdown horizontal rules is not a header
        if !looks_like_yaml(header) {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<Value>(header) {
            Ok(Value::Mapping(map)) => (Self::from_mapping(map), body),
            Ok(_) => {
                tracing::warn!("Front-matter is not a key/value mapping, treating as content");
                (FrontMatter::default(), content)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    fn from_mapping(map: Mapping) -> Self {
        let mut fm = FrontMatter::default();
        for (key, value) in map {
            let Value::String(key) = key else {
                tracing::debug!("Skipping non-string front-matter key {:?}", key);
                continue;
            };
            match key.as_str() {
                "title" => fm.title = Some(value),
                "date" => fm.date = Some(value),
                "tags" => fm.tags = Some(value),
                "summary" => fm.summary = Some(value),
                _ => {
                    fm.extra.insert(key, value);
                }
            }
        }
        fm
    }

    /// Parse the date field, if it is a string holding a valid date
    pub fn parse_date(&self) -> Option<DateTime<Utc>> {
        match &self.date {
            Some(Value::String(s)) => parse_date_string(s),
            _ => None,
        }
    }
}

/// Split `content` into (header, body) when it opens with a `---` line that
/// is closed by another `---` line. One line ending after the closing
/// delimiter belongs to the delimiter.
fn split_header(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER || !first.ends_with('\n') {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        if line.trim_end() == DELIMITER {
            let header = &content[first.len()..offset];
            let body = &content[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }

    None
}

/// Valid YAML front-matter has at least one `key: value` line. URLs and
/// prose with colons do not count.
fn looks_like_yaml(header: &str) -> bool {
    header.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let after_colon = &trimmed[colon_pos + 1..];
        is_yaml_key(key) && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// A quoted key, or a bare key that is not a list item, comment or quote
fn is_yaml_key(key: &str) -> bool {
    let quoted = key.len() >= 2
        && ((key.starts_with('"') && key.ends_with('"'))
            || (key.starts_with('\'') && key.ends_with('\'')));
    if quoted {
        return true;
    }

    !key.is_empty()
        && !key.starts_with(['-', '#', '>'])
        && !key.chars().any(char::is_whitespace)
        && !matches!(key, "http" | "https" | "ftp")
}

/// Parse a date string in various formats.
///
/// Strings without an offset are read as UTC.
pub(crate) fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let zoned = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];
    for fmt in zoned {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in naive {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
