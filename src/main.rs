//! CLI entry point for contentful-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "contentful-blog")]
#[command(version)]
#[command(about = "Blog content pipeline for Contentful", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Read draft content from the preview API
    #[arg(short, long, global = true)]
    preview: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all posts, newest first
    #[command(alias = "ls")]
    List,

    /// Show a post with its previous, next and related posts
    Show {
        /// Slug of the post
        slug: String,
    },

    /// Render a rich text document (JSON) to HTML
    Render {
        /// Path to the document
        file: PathBuf,

        /// Print the presentation tree as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "contentful_blog=debug,info"
    } else {
        "contentful_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List => {
            let blog = contentful_blog::Blog::new(&base_dir)?;
            contentful_blog::commands::list::run(&blog, cli.preview).await?;
        }

        Commands::Show { slug } => {
            let blog = contentful_blog::Blog::new(&base_dir)?;
            tracing::debug!("Showing post {}", slug);
            contentful_blog::commands::show::run(&blog, &slug, cli.preview).await?;
        }

        Commands::Render { file, json } => {
            let path = if file.is_absolute() {
                file
            } else {
                base_dir.join(file)
            };
            contentful_blog::commands::render::run(&path, json)?;
        }

        Commands::Version => {
            println!("contentful-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
