//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::helpers::{category_name, format_date};
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str, category: Option<&str>, tag: Option<&str>) -> Result<()> {
    let index = blog.index();

    match content_type {
        "post" | "posts" => {
            let posts = match tag {
                Some(tag) => index.list_posts_by_tag(tag, category)?,
                None => index.list_posts(category)?,
            };
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}/{}]",
                    format_date(&post.date, "yyyy-MM-dd"),
                    post.title,
                    post.category,
                    post.slug
                );
            }
        }
        "tag" | "tags" => {
            let posts = index.list_posts(category)?;
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *counts.entry(tag.as_str()).or_insert(0) += 1;
                }
            }
            let tags = index.list_tags(category)?;
            println!("Tags ({}):", tags.len());
            for tag in &tags {
                println!("  {} ({})", tag, counts.get(tag.as_str()).copied().unwrap_or(0));
            }
        }
        "category" | "categories" => {
            let categories = index.categories();
            println!("Categories ({}):", categories.len());
            for cat in categories {
                let count = index.list_slugs(Some(cat.as_str()))?.len();
                println!(
                    "  {} - {} ({})",
                    cat,
                    category_name(&blog.config, cat),
                    count
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_types() {
        let dir = TempDir::new().unwrap();
        let tech = dir.path().join("posts").join("tech");
        fs::create_dir_all(&tech).unwrap();
        fs::write(tech.join("a.md"), "---\ntags: [x]\n---\n").unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        assert!(run(&blog, "posts", None, None).is_ok());
        assert!(run(&blog, "posts", Some("tech"), Some("x")).is_ok());
        assert!(run(&blog, "tags", None, None).is_ok());
        assert!(run(&blog, "categories", None, None).is_ok());
        assert!(run(&blog, "pages", None, None).is_err());
    }
}
