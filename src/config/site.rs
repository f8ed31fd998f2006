//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Categories, in display order
    pub categories: Vec<CategoryConfig>,

    // Writing
    pub date_format: String,
    pub summary_length: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "个人博客".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: String::new(),
            language: "zh-CN".to_string(),

            url: "https://your-domain.com".to_string(),

            content_dir: "posts".to_string(),
            public_dir: "public".to_string(),

            categories: CategoryConfig::defaults(),

            date_format: "yyyy年MM月dd日".to_string(),
            summary_length: 150,
            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Category ids in configured order
    pub fn category_ids(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.id.clone()).collect()
    }

    /// Look up a category by id
    pub fn category(&self, id: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.id == id)
    }
}

/// A content category (one subdirectory of the content root)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Directory name and URL segment
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Wrap images for photo viewing
    #[serde(default)]
    pub gallery: bool,
}

impl CategoryConfig {
    fn new(id: &str, name: &str, gallery: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            gallery,
        }
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self::new("tech", "技术", false),
            Self::new("life", "生活", false),
            Self::new("travel", "旅游", true),
        ]
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
