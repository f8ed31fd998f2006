//! Print homepage statistics

use anyhow::Result;
use chrono::Utc;

use crate::helpers::{category_name, format_date};
use crate::stats::SiteStats;
use crate::Blog;

/// Collect statistics for the whole site
pub fn collect(blog: &Blog) -> Result<SiteStats> {
    let index = blog.index();
    let posts = index.list_posts(None)?;
    Ok(SiteStats::collect(&posts, index.categories(), Utc::now()))
}

/// Print site statistics
pub fn run(blog: &Blog) -> Result<()> {
    let stats = collect(blog)?;

    println!("Posts:          {}", stats.total_posts);
    println!("Words:          {}", stats.words_label());
    println!("Tags:           {}", stats.tag_count);
    match &stats.last_updated {
        Some(date) => println!(
            "Last update:    {} ({})",
            format_date(date, &blog.config.date_format),
            stats.days_since_update_label()
        ),
        None => println!("Last update:    {}", stats.days_since_update_label()),
    }
    for entry in &stats.categories {
        println!(
            "  {} ({}): {}",
            category_name(&blog.config, &entry.category),
            entry.category,
            entry.count
        );
    }

    Ok(())
}
