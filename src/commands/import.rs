//! Import an existing markdown document into the store

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::Inkpress;

/// Save an external markdown file into the store under its own name, or
/// under `name` when given
pub fn run(app: &Inkpress, file: &Path, name: Option<&str>) -> Result<()> {
    let contents =
        fs::read_to_string(file).with_context(|| format!("failed to read {:?}", file))?;

    let file_name = match name {
        Some(n) => n.to_string(),
        None => file
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .with_context(|| format!("not a usable file name: {:?}", file))?,
    };

    let outcome = app.store().save(&file_name, &contents);
    if !outcome.success {
        anyhow::bail!(
            "import failed: {}",
            outcome.message.unwrap_or_else(|| "unknown error".to_string())
        );
    }
    if let Some(path) = outcome.path {
        println!("Imported: {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_import_uses_the_source_file_name() {
        let dir = TempDir::new().unwrap();
        let app = Inkpress::new(dir.path()).unwrap();

        let source = dir.path().join("travel-notes.md");
        fs::write(&source, "---\ntitle: Notes\ndate: 2024-02-02\n---\nBody.\n").unwrap();

        run(&app, &source, None).unwrap();
        assert!(app.store().get("travel-notes").unwrap().is_some());
    }

    #[test]
    fn test_import_with_explicit_name() {
        let dir = TempDir::new().unwrap();
        let app = Inkpress::new(dir.path()).unwrap();

        let source = dir.path().join("draft.md");
        fs::write(&source, "---\ntitle: Renamed\n---\n").unwrap();

        run(&app, &source, Some("final.md")).unwrap();
        assert!(app.store().get("final").unwrap().is_some());
        assert!(app.store().get("draft").unwrap().is_none());
    }

    #[test]
    fn test_import_rejects_non_markdown_name() {
        let dir = TempDir::new().unwrap();
        let app = Inkpress::new(dir.path()).unwrap();

        let source = dir.path().join("notes.txt");
        fs::write(&source, "plain text").unwrap();

        assert!(run(&app, &source, None).is_err());
    }
}
