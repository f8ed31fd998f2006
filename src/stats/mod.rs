//! Homepage statistics over the indexed posts

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::content::Post;
use crate::helpers::{days_between, days_since_label};

/// Post count of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Aggregate numbers shown on the homepage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteStats {
    pub total_posts: usize,
    /// Characters of markdown body across all posts
    pub total_chars: usize,
    pub tag_count: usize,
    pub categories: Vec<CategoryCount>,
    /// Date of the newest post
    pub last_updated: Option<String>,
    pub days_since_update: Option<i64>,
}

impl SiteStats {
    /// Collect statistics from posts sorted newest first
    pub fn collect(posts: &[Post], categories: &[String], now: DateTime<Utc>) -> Self {
        let total_chars = posts.iter().map(|p| p.content.chars().count()).sum();

        let tag_count = posts
            .iter()
            .flat_map(|p| p.tags.iter())
            .collect::<BTreeSet<_>>()
            .len();

        let categories = categories
            .iter()
            .map(|category| CategoryCount {
                category: category.clone(),
                count: posts.iter().filter(|p| &p.category == category).count(),
            })
            .collect();

        let newest = posts.first();
        let days_since_update = newest
            .and_then(Post::date_time)
            .map(|date| days_between(&date, &now));

        Self {
            total_posts: posts.len(),
            total_chars,
            tag_count,
            categories,
            last_updated: newest.map(|p| p.date.clone()),
            days_since_update,
        }
    }

    /// Body size in thousands, e.g. `12k+`
    pub fn words_label(&self) -> String {
        let thousands = (self.total_chars as f64 / 1000.0).round() as usize;
        format!("{}k+", thousands)
    }

    /// Time since the newest post, e.g. `今天` or `3 天`
    pub fn days_since_update_label(&self) -> String {
        days_since_label(self.days_since_update)
    }
}
