//! blog-index: content index for a category-organized Markdown blog
//!
//! Posts live under `<content_dir>/<category>/<slug>.md` with a YAML
//! front-matter header. This crate loads them into normalized [`content::Post`]
//! records, answers list/tag/category queries, renders Markdown to HTML and
//! exports everything as JSON for page templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod stats;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The blog site: configuration plus resolved directories
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root holding one directory per category
    pub content_dir: PathBuf,
    /// Output directory for exported data
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// The content index over this site's posts
    pub fn index(&self) -> content::ContentIndex {
        content::ContentIndex::from_blog(self)
    }

    /// Markdown renderer configured for a category
    pub fn renderer(&self, category: &str) -> content::MarkdownRenderer {
        let gallery = self
            .config
            .category(category)
            .map(|c| c.gallery)
            .unwrap_or(false);

        content::MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        )
        .gallery(gallery)
    }

    /// Export posts and indexes as JSON into `public_dir`
    pub fn export(&self) -> Result<()> {
        commands::export::run(self, None)
    }

    /// Export posts and indexes as JSON into another directory
    pub fn export_to(&self, output: &Path) -> Result<()> {
        commands::export::run(self, Some(output))
    }

    /// Remove exported files
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
