//! CLI entry point for inkpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpress::commands;

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version)]
#[command(about = "A markdown-backed blog post store", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List distinct categories
    Categories {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single post by id
    Show {
        /// Post id (file name without extension)
        id: String,

        /// Print the raw markdown body instead of HTML
        #[arg(short, long)]
        raw: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compose a new post and save it into the store
    New {
        /// Title of the new post
        title: String,

        /// Category (defaults to the configured default_category)
        #[arg(long)]
        category: Option<String>,

        /// Author name
        #[arg(short, long)]
        author: Option<String>,

        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,

        /// Publication date (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// File to read the markdown body from
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Overwrite an existing post with the same id
        #[arg(short, long)]
        force: bool,
    },

    /// Import an existing markdown file into the store
    Import {
        /// Markdown file to import
        file: PathBuf,

        /// Store file name to use instead of the original
        #[arg(long = "as", value_name = "NAME")]
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpress=debug,info"
    } else {
        "inkpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let app = inkpress::Inkpress::new(&base_dir)?;

    match cli.command {
        Commands::List { category, json } => commands::list::posts(&app, category.as_deref(), json),

        Commands::Categories { json } => commands::list::categories(&app, json),

        Commands::Show { id, raw, json } => commands::show::run(&app, &id, raw, json),

        Commands::New {
            title,
            category,
            author,
            tags,
            date,
            body_file,
            force,
        } => {
            let tags = tags
                .map(|t| {
                    t.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            let opts = commands::new::NewPost {
                category: category.as_deref(),
                author: author.as_deref(),
                tags,
                date: date.as_deref(),
                body_file: body_file.as_deref(),
                force,
            };
            commands::new::run(&app, &title, &opts)
        }

        Commands::Import { file, name } => commands::import::run(&app, &file, name.as_deref()),
    }
}
