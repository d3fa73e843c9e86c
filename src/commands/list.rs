//! List posts and categories

use anyhow::Result;

use crate::Inkpress;

/// List posts, newest first, optionally filtered by category
pub fn posts(app: &Inkpress, category: Option<&str>, json: bool) -> Result<()> {
    let store = app.store();
    let posts = match category {
        Some(c) => store.by_category(c)?,
        None => store.list()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("  {} - {} [{}]", post.date, post.title, post.category);
    }

    Ok(())
}

/// List distinct categories
pub fn categories(app: &Inkpress, json: bool) -> Result<()> {
    let categories = app.store().categories()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    println!("Categories ({}):", categories.len());
    for category in categories {
        println!("  {}", category);
    }

    Ok(())
}
