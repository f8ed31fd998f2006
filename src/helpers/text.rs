//! Text helper functions

use crate::config::SiteConfig;

/// Display name of a category, falling back to its id
pub fn category_name<'a>(config: &'a SiteConfig, id: &'a str) -> &'a str {
    config
        .category(id)
        .map(|c| c.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(id)
}

/// Cut `text` to at most `length` characters, marking the cut with `...`
pub fn truncate_text(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
