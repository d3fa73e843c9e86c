//! Post models

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// A fully loaded post: front-matter metadata plus the rendered body
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Stable id, the file name minus its extension
    pub id: String,

    /// Post title; falls back to the id when the front matter has none
    pub title: String,

    /// Publication date exactly as written in the front matter
    pub date: String,

    /// Parsed form of `date`, used for ordering. `None` when the date is
    /// absent or in no recognized format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,

    /// Free-text grouping label; empty when the front matter has none
    pub category: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Raw markdown body as stored on disk
    #[serde(skip)]
    pub raw: String,

    /// Body rendered to HTML
    pub content: String,

    /// Source file the post was read from
    #[serde(skip)]
    pub source: PathBuf,

    /// Front-matter fields this store does not model
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Listing record: metadata only, the body is never read into it
#[derive(Debug, Clone, Serialize)]
pub struct PostMeta {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(skip)]
    pub timestamp: Option<NaiveDateTime>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}
