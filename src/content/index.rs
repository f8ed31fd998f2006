//! Content index - loads and queries posts from the content directory
//!
//! Layout on disk is `<root>/<category>/<slug>.md`. Every query re-reads the
//! files it needs; nothing is cached between calls.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{IndexError, Post};
use crate::Blog;

/// Result type for index queries
pub type Result<T, E = IndexError> = std::result::Result<T, E>;

const DEFAULT_CATEGORIES: [&str; 3] = ["tech", "life", "travel"];

/// Read-only index over the posts of a content directory
#[derive(Debug, Clone)]
pub struct ContentIndex {
    root: PathBuf,
    categories: Vec<String>,
}

impl ContentIndex {
    /// Create an index over `root` with the default categories
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self::with_categories(root, DEFAULT_CATEGORIES)
    }

    /// Create an index over `root` with an explicit category set
    pub fn with_categories<P, I, S>(root: P, categories: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Create the index for a site
    pub fn from_blog(blog: &Blog) -> Self {
        Self::with_categories(blog.content_dir.clone(), blog.config.category_ids())
    }

    /// The content root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The supported categories, in configured order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// List post slugs in a category, or directly under the root when no
    /// category is given. A missing directory yields an empty list.
    pub fn list_slugs(&self, category: Option<&str>) -> Result<Vec<String>> {
        let dir = match category {
            Some(cat) if !is_path_component(cat) => {
                tracing::debug!("Ignoring invalid category {:?}", cat);
                return Ok(Vec::new());
            }
            Some(cat) => self.root.join(cat),
            None => self.root.clone(),
        };

        match fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Ok(Vec::new()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(IndexError::ReadDir {
                    category: category.map(str::to_string),
                    path: dir,
                    source,
                })
            }
        }

        let mut slugs = Vec::new();

        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if is_dangling(&e) => {
                    tracing::warn!("Skipping dangling link {:?}", e.path());
                    continue;
                }
                Err(source) => {
                    return Err(IndexError::Walk {
                        category: category.map(str::to_string),
                        source,
                    })
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", entry.path());
                continue;
            };

            if let Some(slug) = name.strip_suffix(".md").filter(|s| !s.is_empty()) {
                slugs.push(slug.to_string());
            }
        }

        Ok(slugs)
    }

    /// Load a single post. A missing file yields `None`.
    pub fn get_post(&self, slug: &str, category: &str) -> Result<Option<Post>> {
        if !is_path_component(slug) || !is_path_component(category) {
            tracing::debug!("Ignoring invalid post reference {:?}/{:?}", category, slug);
            return Ok(None);
        }

        let path = self.post_path(category, slug);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                return Ok(None)
            }
            Err(source) => {
                return Err(IndexError::ReadPost {
                    category: category.to_string(),
                    slug: slug.to_string(),
                    path,
                    source,
                })
            }
        };

        let source = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = source {
            tracing::warn!(
                "Post {}/{} is not valid UTF-8, invalid bytes replaced",
                category,
                slug
            );
        }

        tracing::debug!("Loaded post {}/{}", category, slug);
        Ok(Some(Post::parse(slug, category, &source)))
    }

    /// Load all posts of one category, or of every configured category,
    /// newest first. Posts with equal dates keep their listing order.
    pub fn list_posts(&self, category: Option<&str>) -> Result<Vec<Post>> {
        let categories: Vec<&str> = match category {
            Some(cat) => vec![cat],
            None => self.categories.iter().map(String::as_str).collect(),
        };

        let mut posts = Vec::new();
        for cat in categories {
            for slug in self.list_slugs(Some(cat))? {
                if let Some(post) = self.get_post(&slug, cat)? {
                    posts.push(post);
                }
            }
        }

        // `sort_by` is stable
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// All distinct tags in scope, ascending
    pub fn list_tags(&self, category: Option<&str>) -> Result<Vec<String>> {
        let tags: BTreeSet<String> = self
            .list_posts(category)?
            .into_iter()
            .flat_map(|post| post.tags)
            .collect();

        Ok(tags.into_iter().collect())
    }

    /// Posts carrying `tag` exactly (case-sensitive), newest first
    pub fn list_posts_by_tag(&self, tag: &str, category: Option<&str>) -> Result<Vec<Post>> {
        Ok(self
            .list_posts(category)?
            .into_iter()
            .filter(|post| post.has_tag(tag))
            .collect())
    }

    fn post_path(&self, category: &str, slug: &str) -> PathBuf {
        self.root.join(category).join(format!("{}.md", slug))
    }
}

/// A single, non-special path component
fn is_path_component(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

fn is_dangling(err: &walkdir::Error) -> bool {
    err.io_error()
        .map(|e| e.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(root: &Path, category: &str, slug: &str, content: &str) {
        let dir = root.join(category);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.md", slug)), content).unwrap();
    }

    fn post_source(date: &str, tags: &[&str]) -> String {
        let tags = tags
            .iter()
            .map(|t| format!("\"{}\"", t))
            .collect::<Vec<_>>()
            .join(", ");
        format!("---\ndate: \"{}\"\ntags: [{}]\n---\nBody\n", date, tags)
    }

    /// tech: rust-intro (2024-03-01), async (2024-05-10)
    /// life: spring (2024-04-02), notes (2024-03-01)
    /// travel: kyoto (2023-11-20)
    fn fixture() -> (TempDir, ContentIndex) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write_post(root, "tech", "rust-intro", &post_source("2024-03-01", &["rust", "intro"]));
        write_post(root, "tech", "async", &post_source("2024-05-10", &["rust", "async"]));
        write_post(root, "life", "spring", &post_source("2024-04-02", &["diary"]));
        write_post(root, "life", "notes", &post_source("2024-03-01", &["Rust", "diary"]));
        write_post(root, "travel", "kyoto", &post_source("2023-11-20", &["japan", "photo"]));
        let index = ContentIndex::new(root);
        (dir, index)
    }

    fn keys(posts: &[Post]) -> Vec<String> {
        posts
            .iter()
            .map(|p| format!("{}/{}", p.category, p.slug))
            .collect()
    }

    #[test]
    fn test_categories_are_static() {
        let dir = TempDir::new().unwrap();
        let index = ContentIndex::new(dir.path());
        assert_eq!(index.categories(), ["tech", "life", "travel"]);

        let custom = ContentIndex::with_categories(dir.path(), ["notes"]);
        assert_eq!(custom.categories(), ["notes"]);
    }

    #[test]
    fn test_list_slugs_missing_category() {
        let (_dir, index) = fixture();
        assert!(index.list_slugs(Some("nonexistent")).unwrap().is_empty());
        assert!(index.list_slugs(Some("../tech")).unwrap().is_empty());
    }

    #[test]
    fn test_list_slugs_missing_root() {
        let index = ContentIndex::new("/definitely/not/here");
        assert!(index.list_slugs(None).unwrap().is_empty());
        assert!(index.list_posts(None).unwrap().is_empty());
    }

    #[test]
    fn test_list_slugs_only_markdown_files() {
        let (dir, index) = fixture();
        let tech = dir.path().join("tech");
        fs::write(tech.join("image.png"), b"png").unwrap();
        fs::write(tech.join("draft.md.bak"), "x").unwrap();
        fs::create_dir(tech.join("folder.md")).unwrap();

        let slugs = index.list_slugs(Some("tech")).unwrap();
        assert_eq!(slugs, vec!["async", "rust-intro"]);
    }

    #[test]
    fn test_list_slugs_without_category_reads_root() {
        let (dir, index) = fixture();
        fs::write(dir.path().join("about.md"), "About").unwrap();
        assert_eq!(index.list_slugs(None).unwrap(), vec!["about"]);
    }

    #[test]
    fn test_list_slugs_category_is_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tech"), "not a dir").unwrap();
        let index = ContentIndex::new(dir.path());
        assert!(index.list_slugs(Some("tech")).unwrap().is_empty());
        assert!(index.get_post("x", "tech").unwrap().is_none());
    }

    #[test]
    fn test_get_post_round_trip() {
        let dir = TempDir::new().unwrap();
        write_post(
            dir.path(),
            "tech",
            "hello",
            "---\ntitle: \"Hello\"\ndate: \"2024-01-01\"\ntags: [\"a\",\"b\"]\nsummary: \"intro\"\n---\n# Hi",
        );
        let index = ContentIndex::new(dir.path());

        let post = index.get_post("hello", "tech").unwrap().unwrap();
        assert_eq!(post.slug, "hello");
        assert_eq!(post.category, "tech");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.date, "2024-01-01T00:00:00.000Z");
        assert_eq!(post.tags, vec!["a", "b"]);
        assert_eq!(post.summary, "intro");
        assert_eq!(post.content, "# Hi");
    }

    #[test]
    fn test_get_post_echoes_inputs() {
        let (_dir, index) = fixture();
        for category in index.categories().to_vec() {
            for slug in index.list_slugs(Some(category.as_str())).unwrap() {
                let post = index.get_post(&slug, &category).unwrap().unwrap();
                assert_eq!(post.slug, slug);
                assert_eq!(post.category, category);
            }
        }
    }

    #[test]
    fn test_get_post_missing() {
        let (_dir, index) = fixture();
        assert!(index.get_post("nope", "tech").unwrap().is_none());
        assert!(index.get_post("rust-intro", "nonexistent").unwrap().is_none());
        assert!(index.get_post("rust-intro", "life").unwrap().is_none());
    }

    #[test]
    fn test_get_post_rejects_path_traversal() {
        let (dir, index) = fixture();
        fs::write(dir.path().join("secret.md"), "---\ntitle: Secret\n---\n").unwrap();
        assert!(index.get_post("../secret", "tech").unwrap().is_none());
        assert!(index.get_post("secret", "..").unwrap().is_none());
        assert!(index.get_post("", "tech").unwrap().is_none());
    }

    #[test]
    fn test_get_post_is_idempotent() {
        let (_dir, index) = fixture();
        let first = index.get_post("async", "tech").unwrap();
        let second = index.get_post("async", "tech").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_post_reflects_file_changes() {
        let (dir, index) = fixture();
        write_post(dir.path(), "tech", "async", "---\ntitle: Changed\n---\n");
        let post = index.get_post("async", "tech").unwrap().unwrap();
        assert_eq!(post.title, "Changed");
    }

    #[test]
    fn test_get_post_missing_date_uses_now() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "life", "undated", "---\ntitle: Undated\n---\nText");
        let index = ContentIndex::new(dir.path());

        let post = index.get_post("undated", "life").unwrap().unwrap();
        let date = post.date_time().expect("date should parse");
        assert!(date > chrono::Utc::now() - chrono::Duration::minutes(1));
    }

    #[test]
    fn test_read_error_is_fatal() {
        let (dir, index) = fixture();
        fs::create_dir(dir.path().join("tech").join("broken.md")).unwrap();

        let err = index.get_post("broken", "tech").unwrap_err();
        match err {
            IndexError::ReadPost { category, slug, .. } => {
                assert_eq!(category, "tech");
                assert_eq!(slug, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let (dir, index) = fixture();
        fs::write(
            dir.path().join("tech").join("latin.md"),
            b"---\ntitle: Cafe\ntags: [food]\n---\ncaf\xe9",
        )
        .unwrap();

        let post = index.get_post("latin", "tech").unwrap().unwrap();
        assert_eq!(post.title, "Cafe");
        assert_eq!(post.content, "caf\u{fffd}");

        let posts = index.list_posts(None).unwrap();
        assert!(posts.iter().any(|p| p.slug == "latin"));
        assert!(index.list_tags(None).unwrap().contains(&"food".to_string()));
    }

    #[test]
    fn test_list_posts_sorted_desc() {
        let (_dir, index) = fixture();
        let posts = index.list_posts(None).unwrap();

        assert_eq!(posts.len(), 5);
        for pair in posts.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
        // Equal dates keep category order: tech before life
        assert_eq!(
            keys(&posts),
            vec![
                "tech/async",
                "life/spring",
                "tech/rust-intro",
                "life/notes",
                "travel/kyoto"
            ]
        );
    }

    #[test]
    fn test_list_posts_by_category() {
        let (_dir, index) = fixture();
        let posts = index.list_posts(Some("life")).unwrap();
        assert_eq!(keys(&posts), vec!["life/spring", "life/notes"]);
    }

    #[test]
    fn test_list_posts_ignores_unconfigured_directories() {
        let (dir, index) = fixture();
        write_post(dir.path(), "drafts", "wip", &post_source("2025-01-01", &["rust"]));
        assert_eq!(index.list_posts(None).unwrap().len(), 5);
        assert_eq!(index.list_posts(Some("drafts")).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_category() {
        let (_dir, index) = fixture();
        assert!(index.list_posts(Some("nonexistent")).unwrap().is_empty());
        assert!(index.list_tags(Some("nonexistent")).unwrap().is_empty());
        assert!(index
            .list_posts_by_tag("rust", Some("nonexistent"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_list_tags_sorted_unique() {
        let (_dir, index) = fixture();
        let tags = index.list_tags(None).unwrap();
        assert_eq!(
            tags,
            vec!["Rust", "async", "diary", "intro", "japan", "photo", "rust"]
        );

        let tech = index.list_tags(Some("tech")).unwrap();
        assert_eq!(tech, vec!["async", "intro", "rust"]);
    }

    #[test]
    fn test_list_posts_by_tag() {
        let (_dir, index) = fixture();

        let posts = index.list_posts_by_tag("rust", None).unwrap();
        assert_eq!(keys(&posts), vec!["tech/async", "tech/rust-intro"]);
        assert!(posts.iter().all(|p| p.tags.contains(&"rust".to_string())));

        // Case-sensitive
        let posts = index.list_posts_by_tag("Rust", None).unwrap();
        assert_eq!(keys(&posts), vec!["life/notes"]);

        let posts = index.list_posts_by_tag("diary", Some("life")).unwrap();
        assert_eq!(keys(&posts), vec!["life/spring", "life/notes"]);

        assert!(index.list_posts_by_tag("missing", None).unwrap().is_empty());
    }
}
