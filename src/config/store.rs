//! Store configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Configuration for the post store and the authoring commands.
///
/// Every field has a default, so a base directory without a `_config.yml`
/// works out of the box.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the post files, relative to the base directory
    pub posts_dir: String,

    /// Category applied when a new post does not name one
    pub default_category: String,

    /// File-name pattern for new posts; `:title` is the slugified title,
    /// `:year`/`:month`/`:day` expand from the current date
    pub new_post_name: String,

    /// strftime pattern for dates written into new front matter
    pub date_format: String,

    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            default_category: "uncategorized".to_string(),
            new_post_name: ":title.md".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: StoreConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code-highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.new_post_name, ":title.md");
        assert!(config.highlight.enable);
    }

    #[test]
    fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(
            &path,
            "posts_dir: content\nhighlight:\n  enable: false\nsite_name: My Blog\n",
        )
        .unwrap();

        let config = StoreConfig::load(&path).unwrap();
        assert_eq!(config.posts_dir, "content");
        assert!(!config.highlight.enable);
        // untouched fields keep their defaults
        assert_eq!(config.default_category, "uncategorized");
        // unknown fields are preserved, not rejected
        assert!(config.extra.contains_key("site_name"));
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "posts_dir: [oops\n").unwrap();
        assert!(StoreConfig::load(&path).is_err());
    }
}
