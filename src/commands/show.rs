//! Show a single post

use anyhow::Result;

use crate::Inkpress;

/// Print one post by id.
///
/// An id with no backing file is reported as a message, not a failure;
/// only storage errors propagate.
pub fn run(app: &Inkpress, id: &str, raw: bool, json: bool) -> Result<()> {
    let Some(post) = app.store().get(id)? else {
        println!("No post with id: {}", id);
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else if raw {
        println!("{}", post.raw);
    } else {
        println!("{} ({})", post.title, post.date);
        if !post.category.is_empty() {
            println!("category: {}", post.category);
        }
        if let Some(author) = &post.author {
            println!("author: {}", author);
        }
        if !post.tags.is_empty() {
            println!("tags: {}", post.tags.join(", "));
        }
        println!();
        println!("{}", post.content);
    }

    Ok(())
}
