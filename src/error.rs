//! Error types for the post store

use std::path::PathBuf;
use thiserror::Error;

use crate::content::FrontMatterError;

/// A storage failure surfaced by a store operation.
///
/// A missing post is not an error: [`crate::store::PostStore::get`] returns
/// `Ok(None)` for an id with no backing file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the posts directory or a post file failed
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a post file (or creating the posts directory) failed
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A post file carries a front-matter block that does not parse
    #[error("invalid front matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    /// A save was requested under a name that cannot live in the store
    #[error("invalid post file name: {name:?} (expected a bare *.md name)")]
    InvalidFileName { name: String },
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_the_path() {
        let err = StoreError::Read {
            path: PathBuf::from("posts/a.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("posts/a.md"));

        let err = StoreError::InvalidFileName {
            name: "../escape.md".to_string(),
        };
        assert!(err.to_string().contains("../escape.md"));
    }
}
