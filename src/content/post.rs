//! Post model and metadata normalization

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::FrontMatter;
use crate::helpers::post_url;

/// Front-matter keys that map onto record fields and never reach `extra`
const RESERVED_KEYS: [&str; 7] = [
    "title", "date", "tags", "summary", "category", "slug", "content",
];

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// File name without the `.md` extension
    pub slug: String,

    /// Category (content subdirectory)
    pub category: String,

    /// Post title, the slug when absent
    pub title: String,

    /// Publication date, `YYYY-MM-DDTHH:MM:SS.mmmZ`
    pub date: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Short description, empty when absent
    pub summary: String,

    /// Raw markdown body
    pub content: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Post {
    /// Build a post from the full text of its source file
    pub fn parse(slug: &str, category: &str, source: &str) -> Self {
        let (fm, body) = FrontMatter::parse(source);
        Self::from_front_matter(slug, category, fm, body)
    }

    /// Build a post from parsed front-matter and body
    pub fn from_front_matter(slug: &str, category: &str, fm: FrontMatter, body: &str) -> Self {
        let date = fm.parse_date().unwrap_or_else(|| {
            if fm.date.is_some() {
                tracing::warn!("Invalid date in {}/{}, using current time", category, slug);
            }
            Utc::now()
        });

        let title = fm
            .title
            .as_ref()
            .and_then(scalar_to_string)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| slug.to_string());

        let tags = match &fm.tags {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        };

        let summary = match fm.summary {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };

        let extra = fm
            .extra
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .filter_map(|(key, value)| Some((key.clone(), yaml_to_json(value)?)))
            .collect();

        Self {
            slug: slug.to_string(),
            category: category.to_string(),
            title,
            date: format_timestamp(&date),
            tags,
            summary,
            content: body.to_string(),
            extra,
        }
    }

    /// The publication date as a timestamp
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    /// Whether the post carries `tag` (exact match)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// URL path of the post page
    pub fn url(&self) -> String {
        post_url(&self.category, &self.slug)
    }

    /// Get the previous (newer) post in a date-sorted list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = self.position(posts)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the next (older) post in a date-sorted list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = self.position(posts)?;
        posts.get(pos + 1)
    }

    fn position(&self, posts: &[Post]) -> Option<usize> {
        posts
            .iter()
            .position(|p| p.category == self.category && p.slug == self.slug)
    }
}

/// A lightweight reference to a post, for navigation links
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRef {
    pub category: String,
    pub slug: String,
    pub title: String,
    pub url: String,
}

impl From<&Post> for PostRef {
    fn from(post: &Post) -> Self {
        Self {
            category: post.category.clone(),
            slug: post.slug.clone(),
            title: post.title.clone(),
            url: post.url(),
        }
    }
}

/// Canonical timestamp form used for `Post::date`
pub fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Convert a YAML value to plain JSON data.
///
/// Tags are stripped, scalar map keys become strings. Non-finite floats and
/// entries keyed by collections have no JSON form and are dropped.
fn yaml_to_json(value: &Value) -> Option<serde_json::Value> {
    use serde_json::Value as Json;

    let json = match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Json::from(i)
            } else if let Some(u) = n.as_u64() {
                Json::from(u)
            } else {
                Json::Number(serde_json::Number::from_f64(n.as_f64()?)?)
            }
        }
        Value::String(s) => Json::String(s.clone()),
        Value::Sequence(items) => Json::Array(items.iter().filter_map(yaml_to_json).collect()),
        Value::Mapping(map) => Json::Object(
            map.iter()
                .filter_map(|(k, v)| Some((scalar_to_string(k)?, yaml_to_json(v)?)))
                .collect(),
        ),
        Value::Tagged(tagged) => return yaml_to_json(&tagged.value),
    };

    Some(json)
}
