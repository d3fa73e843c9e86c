//! Post store - the on-disk collection of markdown posts
//!
//! Every operation re-scans the posts directory; the files are the only
//! source of truth and nothing is cached between calls. Concurrent saves
//! of the same file race at the filesystem level and the last writer wins.

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::{FrontMatter, MarkdownRenderer, Post, PostMeta};
use crate::error::{Result, StoreError};
use crate::Inkpress;

lazy_static! {
    /// Bare markdown file names only: no path components, no leading dot
    static ref POST_FILE_NAME: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._ -]*\.(md|markdown)$").unwrap();
}

/// Outcome of a save.
///
/// Save failures become a message here instead of an error, so the
/// form/CLI boundary above never has anything to catch.
#[derive(Debug)]
pub struct SaveOutcome {
    pub success: bool,
    /// Path written, on success
    pub path: Option<PathBuf>,
    /// Human-readable failure message
    pub message: Option<String>,
}

/// Reads and writes the posts directory
pub struct PostStore<'a> {
    app: &'a Inkpress,
    renderer: MarkdownRenderer,
}

impl<'a> PostStore<'a> {
    pub fn new(app: &'a Inkpress) -> Self {
        let renderer = MarkdownRenderer::with_theme(
            &app.config.highlight.theme,
            app.config.highlight.enable,
        );
        Self { app, renderer }
    }

    fn posts_dir(&self) -> &Path {
        &self.app.posts_dir
    }

    /// List every post, sorted by date descending.
    ///
    /// Ties keep directory enumeration order, which varies across
    /// filesystems. A missing posts directory lists as empty; a file whose
    /// front matter does not parse is skipped with a warning so one bad
    /// file never hides the rest.
    pub fn list(&self) -> Result<Vec<PostMeta>> {
        let dir = self.posts_dir();
        if !dir.exists() {
            tracing::debug!("posts directory {:?} does not exist", dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        for entry in WalkDir::new(dir).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| dir.to_path_buf());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                StoreError::Read { path, source }
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }
            match self.read_meta(path) {
                Ok(meta) => posts.push(meta),
                Err(e) => tracing::warn!("skipping {:?}: {}", path, e),
            }
        }

        // Stable sort: equal dates keep scan order. Posts without a
        // parseable date go last, ordered among themselves by the raw
        // date string.
        posts.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.date.cmp(&a.date))
        });

        Ok(posts)
    }

    /// Fetch a single post by id, rendering its body to HTML.
    ///
    /// `Ok(None)` means no file backs the id; an error means the file
    /// exists but could not be read or parsed.
    pub fn get(&self, id: &str) -> Result<Option<Post>> {
        let Some(path) = self.resolve(id) else {
            return Ok(None);
        };

        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&raw).map_err(|source| StoreError::FrontMatter {
            path: path.clone(),
            source,
        })?;

        let content = self.renderer.render(body);
        let timestamp = fm.parse_date();

        Ok(Some(Post {
            id: id.to_string(),
            title: fm.title.unwrap_or_else(|| id.to_string()),
            date: fm.date.unwrap_or_default(),
            timestamp,
            category: fm.category.unwrap_or_default(),
            author: fm.author,
            tags: fm.tags,
            raw: body.to_string(),
            content,
            source: path,
            extra: fm.extra,
        }))
    }

    /// Distinct categories across all posts, duplicates collapsed,
    /// first-seen order
    pub fn categories(&self) -> Result<Vec<String>> {
        let mut categories = IndexSet::new();
        for post in self.list()? {
            categories.insert(post.category);
        }
        Ok(categories.into_iter().collect())
    }

    /// Posts whose category matches `category` exactly
    pub fn by_category(&self, category: &str) -> Result<Vec<PostMeta>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Write a post document into the store, creating the posts directory
    /// if needed and overwriting any existing file of the same name.
    pub fn save(&self, file_name: &str, contents: &str) -> SaveOutcome {
        match self.try_save(file_name, contents) {
            Ok(path) => {
                tracing::info!("saved {:?}", path);
                SaveOutcome {
                    success: true,
                    path: Some(path),
                    message: None,
                }
            }
            Err(e) => {
                tracing::error!("save of {:?} failed: {}", file_name, e);
                SaveOutcome {
                    success: false,
                    path: None,
                    message: Some(e.to_string()),
                }
            }
        }
    }

    fn try_save(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        if !POST_FILE_NAME.is_match(file_name) {
            return Err(StoreError::InvalidFileName {
                name: file_name.to_string(),
            });
        }

        let dir = self.posts_dir();
        fs::create_dir_all(dir).map_err(|source| StoreError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(file_name);
        fs::write(&path, contents).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Map an id to its backing file, if any. Ids never contain path
    /// separators; anything else cannot name a store file.
    fn resolve(&self, id: &str) -> Option<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) {
            return None;
        }
        for ext in ["md", "markdown"] {
            let candidate = self.posts_dir().join(format!("{}.{}", id, ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    /// Read a post file's metadata without rendering the body
    fn read_meta(&self, path: &Path) -> Result<PostMeta> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, _body) = FrontMatter::parse(&raw).map_err(|source| StoreError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;

        let id = file_stem(path);
        let timestamp = fm.parse_date();
        Ok(PostMeta {
            title: fm.title.unwrap_or_else(|| id.clone()),
            date: fm.date.unwrap_or_default(),
            timestamp,
            category: fm.category.unwrap_or_default(),
            author: fm.author,
            id,
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
