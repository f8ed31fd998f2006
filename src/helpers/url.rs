//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// URL path of a post page
///
/// # Examples
/// ```ignore
/// post_url("tech", "hello") // -> "/posts/tech/hello"
/// ```
pub fn post_url(category: &str, slug: &str) -> String {
    format!("/posts/{}/{}", encode_segment(category), encode_segment(slug))
}

/// URL path of a category listing page
pub fn category_url(category: &str) -> String {
    format!("/{}", encode_segment(category))
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url(&config, "/posts/tech/hello") // -> "https://example.com/posts/tech/hello"
/// ```
pub fn full_url(config: &SiteConfig, path: &str) -> String {
    format!(
        "{}/{}",
        config.url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encode one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}
