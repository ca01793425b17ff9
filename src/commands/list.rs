//! List posts

use anyhow::Result;

use crate::content::ContentLoader;
use crate::helpers::format_date;
use crate::Blog;

/// List all posts, newest first
pub async fn run(blog: &Blog, preview: bool) -> Result<()> {
    let source = blog.source()?;
    let loader = ContentLoader::new(&blog.config, source.as_ref());
    let posts = loader.all_posts(blog.preview(preview)).await?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}]",
            format_date(Some(&post.published_date), "%Y-%m-%d"),
            post.title,
            post.slug
        );
    }

    Ok(())
}
