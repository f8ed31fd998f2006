//! Show a single post

use anyhow::Result;
use serde::Serialize;

use crate::content::{Post, PostRef};
use crate::helpers::Helpers;
use crate::Blog;

/// Everything a post detail page needs
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    #[serde(flatten)]
    pub post: Post,
    pub html: String,
    pub category_name: String,
    pub display_date: String,
    pub permalink: String,
    pub excerpt: String,
    /// Newer post in the same category
    pub prev: Option<PostRef>,
    /// Older post in the same category
    pub next: Option<PostRef>,
}

impl PostPage {
    /// Build the page for `post`; `siblings` is its category, newest first
    pub fn build(blog: &Blog, post: Post, siblings: &[Post]) -> Self {
        let helpers = Helpers::new(&blog.config);
        let html = blog.renderer(&post.category).render(&post.content);

        Self {
            html,
            category_name: helpers.category_name(&post.category).to_string(),
            display_date: helpers.date(&post.date),
            permalink: helpers.permalink(&post),
            excerpt: helpers.excerpt(&post),
            prev: post.prev(siblings).map(PostRef::from),
            next: post.next(siblings).map(PostRef::from),
            post,
        }
    }

    /// Load the page for `category/slug`, `None` when there is no such post
    pub fn load(blog: &Blog, category: &str, slug: &str) -> Result<Option<Self>> {
        let index = blog.index();
        let Some(post) = index.get_post(slug, category)? else {
            return Ok(None);
        };
        let siblings = index.list_posts(Some(category))?;
        Ok(Some(Self::build(blog, post, &siblings)))
    }
}

/// Print a post's metadata, navigation and optionally its HTML
pub fn run(blog: &Blog, category: &str, slug: &str, html: bool) -> Result<()> {
    let Some(page) = PostPage::load(blog, category, slug)? else {
        anyhow::bail!("Post not found: {}/{}", category, slug);
    };

    println!("{}", page.post.title);
    println!("  Category: {} ({})", page.category_name, page.post.category);
    println!("  Date:     {}", page.display_date);
    if !page.post.tags.is_empty() {
        println!("  Tags:     {}", page.post.tags.join(", "));
    }
    println!("  URL:      {}", page.permalink);
    println!("  Summary:  {}", page.excerpt);
    if let Some(prev) = &page.prev {
        println!("  Prev:     {} ({})", prev.title, prev.url);
    }
    if let Some(next) = &page.next {
        println!("  Next:     {} ({})", next.title, next.url);
    }

    if html {
        println!();
        println!("{}", page.html);
    }

    Ok(())
}
