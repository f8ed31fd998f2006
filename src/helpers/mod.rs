//! Helper functions for presenting posts
//!
//! Date formatting, URLs, category names and text truncation as the blog's
//! pages display them.

mod date;
mod text;
mod url;

pub use date::*;
pub use text::*;
pub use url::*;

use crate::config::SiteConfig;
use crate::content::Post;

/// Helpers bound to a site configuration
pub struct Helpers<'a> {
    config: &'a SiteConfig,
}

impl<'a> Helpers<'a> {
    /// Create a new helpers instance
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Format a post date with the configured pattern
    pub fn date(&self, date: &str) -> String {
        format_date(date, &self.config.date_format)
    }

    /// Display name of a category
    pub fn category_name(&self, id: &'a str) -> &'a str {
        category_name(self.config, id)
    }

    /// Absolute URL of a post
    pub fn permalink(&self, post: &Post) -> String {
        full_url(self.config, &post.url())
    }

    /// Summary for cards and meta tags: the summary, else the truncated
    /// body, else the title
    pub fn excerpt(&self, post: &Post) -> String {
        if !post.summary.is_empty() {
            post.summary.clone()
        } else if !post.content.trim().is_empty() {
            truncate_text(post.content.trim(), self.config.summary_length)
        } else {
            post.title.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers() {
        let mut config = SiteConfig::default();
        config.url = "https://blog.example".to_string();
        config.summary_length = 5;
        let helpers = Helpers::new(&config);

        let post = Post::parse(
            "hello",
            "tech",
            "---\ntitle: Hello\ndate: 2024-02-03\n---\nA long body text",
        );
        assert_eq!(helpers.date(&post.date), "2024年02月03日");
        assert_eq!(helpers.category_name("tech"), "技术");
        assert_eq!(helpers.permalink(&post), "https://blog.example/posts/tech/hello");
        assert_eq!(helpers.excerpt(&post), "A lon...");

        let with_summary = Post::parse("s", "tech", "---\nsummary: Short\n---\nBody");
        assert_eq!(helpers.excerpt(&with_summary), "Short");

        let empty = Post::parse("e", "tech", "---\ntitle: Only title\n---\n");
        assert_eq!(helpers.excerpt(&empty), "Only title");
    }
}
