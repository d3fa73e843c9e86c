//! inkpress: a markdown-backed blog post store
//!
//! Posts live as front-matter-plus-markdown files in a single directory,
//! which is the sole source of truth: every operation re-reads the disk.
//! [`store::PostStore`] owns all interaction with that directory; the
//! binary wraps it in an authoring CLI.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod store;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// The main application: resolved directories plus configuration
#[derive(Clone)]
pub struct Inkpress {
    /// Store configuration
    pub config: config::StoreConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post files
    pub posts_dir: PathBuf,
}

impl Inkpress {
    /// Create a new instance from a base directory, reading `_config.yml`
    /// when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::StoreConfig::load(&config_path)
                .with_context(|| format!("failed to load {:?}", config_path))?
        } else {
            config::StoreConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Open the post store backed by this instance's posts directory
    pub fn store(&self) -> store::PostStore<'_> {
        store::PostStore::new(self)
    }
}
