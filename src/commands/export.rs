//! Export indexed content as JSON for page templates
//!
//! Layout of the output directory:
//! - `posts.json`: post list, newest first
//! - `tags.json`: all tags plus tags per category
//! - `categories.json`: categories with display names and counts
//! - `stats.json`: homepage statistics
//! - `posts/<category>/<slug>.json`: one detail page per post

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::show::PostPage;
use crate::content::Post;
use crate::helpers::{category_name, category_url, Helpers};
use crate::stats::SiteStats;
use crate::Blog;

/// Export everything into `output`, or the configured public directory
pub fn run(blog: &Blog, output: Option<&Path>) -> Result<()> {
    let start = std::time::Instant::now();
    let out_dir = output.unwrap_or(blog.public_dir.as_path());
    fs::create_dir_all(out_dir)?;

    let index = blog.index();
    let posts = index.list_posts(None)?;
    tracing::info!("Loaded {} posts", posts.len());

    write_json(&out_dir.join("posts.json"), &post_list(blog, &posts))?;

    let mut tags = serde_json::Map::new();
    tags.insert("all".to_string(), serde_json::to_value(index.list_tags(None)?)?);
    let mut by_category = serde_json::Map::new();
    for category in index.categories() {
        by_category.insert(
            category.clone(),
            serde_json::to_value(index.list_tags(Some(category.as_str()))?)?,
        );
    }
    tags.insert("by_category".to_string(), by_category.into());
    write_json(&out_dir.join("tags.json"), &tags)?;

    let categories: Vec<serde_json::Value> = index
        .categories()
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": category_name(&blog.config, id),
                "url": category_url(id),
                "count": posts.iter().filter(|p| &p.category == id).count(),
            })
        })
        .collect();
    write_json(&out_dir.join("categories.json"), &categories)?;

    let stats = SiteStats::collect(&posts, index.categories(), Utc::now());
    let words_label = stats.words_label();
    let days_label = stats.days_since_update_label();
    write_json(
        &out_dir.join("stats.json"),
        &serde_json::json!({
            "stats": stats,
            "words_label": words_label,
            "days_since_update_label": days_label,
        }),
    )?;

    let mut pages = 0;
    for category in index.categories() {
        let siblings: Vec<Post> = posts
            .iter()
            .filter(|p| &p.category == category)
            .cloned()
            .collect();
        let dir = out_dir.join("posts").join(category);
        fs::create_dir_all(&dir)?;

        for post in &siblings {
            let path = dir.join(format!("{}.json", post.slug));
            let page = PostPage::build(blog, post.clone(), &siblings);
            write_json(&path, &page)?;
            tracing::debug!("Exported {:?}", path);
            pages += 1;
        }
    }

    tracing::info!(
        "Exported {} post pages to {:?} in {:.2}s",
        pages,
        out_dir,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Card data for post listings
fn post_list(blog: &Blog, posts: &[Post]) -> Vec<serde_json::Value> {
    let helpers = Helpers::new(&blog.config);
    posts
        .iter()
        .map(|p| {
            serde_json::json!({
                "slug": p.slug,
                "category": p.category,
                "category_name": helpers.category_name(&p.category),
                "title": p.title,
                "url": p.url(),
                "date": p.date,
                "display_date": helpers.date(&p.date),
                "tags": p.tags,
                "excerpt": helpers.excerpt(p),
            })
        })
        .collect()
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
