//! Compose a new post and save it into the store

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::FrontMatter;
use crate::Inkpress;

/// Fields collected from the authoring form
#[derive(Debug, Default)]
pub struct NewPost<'a> {
    pub category: Option<&'a str>,
    pub author: Option<&'a str>,
    pub tags: Vec<String>,
    pub date: Option<&'a str>,
    /// File to read the markdown body from; empty body when absent
    pub body_file: Option<&'a Path>,
    /// Overwrite an existing post with the same id
    pub force: bool,
}

/// Compose a post document from the given fields and save it
pub fn run(app: &Inkpress, title: &str, opts: &NewPost) -> Result<()> {
    let file_name = post_file_name(&app.config.new_post_name, title);
    let id = file_name
        .strip_suffix(".markdown")
        .or_else(|| file_name.strip_suffix(".md"))
        .unwrap_or(&file_name);

    let store = app.store();
    if !opts.force && store.get(id)?.is_some() {
        anyhow::bail!("post already exists: {} (use --force to overwrite)", id);
    }

    let date = match opts.date {
        Some(d) => d.to_string(),
        None => chrono::Local::now()
            .format(&app.config.date_format)
            .to_string(),
    };
    let category = opts.category.unwrap_or(&app.config.default_category);

    let body = match opts.body_file {
        Some(path) => fs::read_to_string(path)?,
        None => String::new(),
    };

    let document = compose(title, &date, category, opts.author, &opts.tags, &body)?;

    let outcome = store.save(&file_name, &document);
    if !outcome.success {
        anyhow::bail!(
            "failed to save {}: {}",
            file_name,
            outcome.message.unwrap_or_else(|| "unknown error".to_string())
        );
    }
    if let Some(path) = outcome.path {
        println!("Created: {:?}", path);
    }

    Ok(())
}

/// Build the full document: serialized front matter plus the body
fn compose(
    title: &str,
    date: &str,
    category: &str,
    author: Option<&str>,
    tags: &[String],
    body: &str,
) -> Result<String> {
    let fm = FrontMatter {
        title: Some(title.to_string()),
        date: Some(date.to_string()),
        category: Some(category.to_string()),
        author: author.map(str::to_string),
        tags: tags.to_vec(),
        extra: HashMap::new(),
    };
    let yaml = serde_yaml::to_string(&fm)?;
    Ok(format!("---\n{}---\n\n{}", yaml, body))
}

/// Expand the configured `new_post_name` pattern (`:title.md` by default)
fn post_file_name(pattern: &str, title: &str) -> String {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);

    pattern
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_post_file_name_slugifies_title() {
        assert_eq!(post_file_name(":title.md", "Hello World!"), "hello-world.md");
    }

    #[test]
    fn test_post_file_name_expands_date_placeholders() {
        let name = post_file_name(":year-:title.md", "Hi");
        let year = chrono::Local::now().format("%Y").to_string();
        assert_eq!(name, format!("{}-hi.md", year));
    }

    #[test]
    fn test_compose_round_trips_through_the_parser() {
        let document = compose(
            "Hello: a subtitle",
            "2024-01-01",
            "Tech",
            Some("Ada"),
            &["rust".to_string(), "cli".to_string()],
            "# Hi\n",
        )
        .unwrap();

        let (fm, body) = FrontMatter::parse(&document).unwrap();
        assert_eq!(fm.title, Some("Hello: a subtitle".to_string()));
        assert_eq!(fm.date, Some("2024-01-01".to_string()));
        assert_eq!(fm.category, Some("Tech".to_string()));
        assert_eq!(fm.author, Some("Ada".to_string()));
        assert_eq!(fm.tags, vec!["rust", "cli"]);
        assert_eq!(body.trim(), "# Hi");
    }

    #[test]
    fn test_run_creates_a_post_with_defaults() {
        let dir = TempDir::new().unwrap();
        let app = Inkpress::new(dir.path()).unwrap();

        run(&app, "My First Post", &NewPost::default()).unwrap();

        let post = app.store().get("my-first-post").unwrap().unwrap();
        assert_eq!(post.title, "My First Post");
        assert_eq!(post.category, "uncategorized");
        assert!(!post.date.is_empty());
    }

    #[test]
    fn test_run_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let app = Inkpress::new(dir.path()).unwrap();

        run(&app, "Same Title", &NewPost::default()).unwrap();
        assert!(run(&app, "Same Title", &NewPost::default()).is_err());

        let forced = NewPost {
            category: Some("Tech"),
            force: true,
            ..Default::default()
        };
        run(&app, "Same Title", &forced).unwrap();
        let post = app.store().get("same-title").unwrap().unwrap();
        assert_eq!(post.category, "Tech");
    }

    #[test]
    fn test_run_reads_body_from_file() {
        let dir = TempDir::new().unwrap();
        let app = Inkpress::new(dir.path()).unwrap();

        let body_path = dir.path().join("draft.md");
        fs::write(&body_path, "# Draft heading\n").unwrap();

        let opts = NewPost {
            body_file: Some(&body_path),
            ..Default::default()
        };
        run(&app, "From Draft", &opts).unwrap();

        let post = app.store().get("from-draft").unwrap().unwrap();
        assert!(post.content.contains("<h1>Draft heading</h1>"));
    }
}
