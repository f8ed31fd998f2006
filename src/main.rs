//! CLI entry point for blog-index

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-index")]
#[command(version)]
#[command(about = "Index, inspect and export a category-organized Markdown blog", long_about = None)]
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
    /// List posts, tags or categories
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,

        /// Only posts with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show a single post
    Show {
        /// Category of the post
        category: String,

        /// Slug of the post (file name without .md)
        slug: String,

        /// Print the rendered HTML
        #[arg(long)]
        html: bool,
    },

    /// Print homepage statistics
    Stats,

    /// Export posts, tags and stats as JSON
    #[command(alias = "e")]
    Export {
        /// Output directory (defaults to public_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove exported files
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_index=debug,info"
    } else {
        "blog_index=info"
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
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::List {
            r#type,
            category,
            tag,
        } => {
            let blog = blog_index::Blog::new(&base_dir)?;
            blog_index::commands::list::run(&blog, &r#type, category.as_deref(), tag.as_deref())?;
        }

        Commands::Show {
            category,
            slug,
            html,
        } => {
            let blog = blog_index::Blog::new(&base_dir)?;
            blog_index::commands::show::run(&blog, &category, &slug, html)?;
        }

        Commands::Stats => {
            let blog = blog_index::Blog::new(&base_dir)?;
            blog_index::commands::stats::run(&blog)?;
        }

        Commands::Export { output } => {
            let blog = blog_index::Blog::new(&base_dir)?;
            tracing::info!("Exporting content from {:?}", blog.content_dir);
            match output {
                Some(dir) => blog.export_to(&dir)?,
                None => blog.export()?,
            }
            println!("Exported successfully!");
        }

        Commands::Clean => {
            let blog = blog_index::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("blog-index version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
