//! Content module - loads, normalizes and renders posts

mod error;
mod frontmatter;
pub mod index;
mod markdown;
mod post;

pub use error::IndexError;
pub use frontmatter::FrontMatter;
pub(crate) use frontmatter::parse_date_string;
pub use index::ContentIndex;
pub use markdown::MarkdownRenderer;
pub use post::{format_timestamp, Post, PostRef};
