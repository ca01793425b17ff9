//! Show a single post with its neighbours and related posts

use anyhow::{bail, Result};

use crate::content::{ContentLoader, PostPage};
use crate::helpers::format_date;
use crate::richtext::{html, render_document};
use crate::Blog;

/// Print a post page
pub async fn run(blog: &Blog, slug: &str, preview: bool) -> Result<()> {
    let source = blog.source()?;
    let loader = ContentLoader::new(&blog.config, source.as_ref());

    let Some(page) = loader.post_page(slug, blog.preview(preview)).await? else {
        bail!("Post not found: {}", slug);
    };

    print!("{}", format_page(&page, &blog.config.date_format));
    Ok(())
}

/// Plain text layout of a post page with the body as HTML
pub fn format_page(page: &PostPage, date_format: &str) -> String {
    let post = &page.post;
    let mut out = String::new();

    out.push_str(&format!("{}\n", post.title));
    let date = format_date(Some(&post.published_date), date_format);
    match &post.author {
        Some(author) => out.push_str(&format!("{} - {}\n", author.name, date)),
        None => out.push_str(&format!("{}\n", date)),
    }
    if let Some(image) = &post.featured_image {
        out.push_str(&format!("Image: {} ({}x{})\n", image.src, image.width, image.height));
    }

    out.push('\n');
    out.push_str(&html::to_html(&render_document(&post.content)));
    out.push_str("\n\n");

    if let Some(prev) = &page.previous {
        out.push_str(&format!("Previous Post: {} [{}]\n", prev.title, prev.slug));
    }
    if let Some(next) = &page.next {
        out.push_str(&format!("Next Post: {} [{}]\n", next.title, next.slug));
    }

    if let Some(related) = post.related_blog_posts.as_ref().filter(|r| !r.is_empty()) {
        out.push_str("\nRelated Posts:\n");
        for r in related {
            out.push_str(&format!(
                "  {} - {} [{}]\n",
                format_date(Some(&r.published_date), date_format),
                r.title,
                r.slug
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use serde_json::json;

    #[tokio::test]
    async fn test_format_page() {
        let entry = |slug: &str, date: &str| {
            json!({
                "sys": {"id": slug, "type": "Entry"},
                "fields": {
                    "slug": slug,
                    "title": slug.to_uppercase(),
                    "publishedDate": date,
                    "tags": ["go"],
                    "content": {
                        "nodeType": "document",
                        "content": [{
                            "nodeType": "paragraph",
                            "content": [{"nodeType": "text", "value": "Body", "marks": []}]
                        }]
                    }
                }
            })
        };
        let src = MemorySource::from_value(json!([
            entry("a", "2024-03-01"),
            entry("b", "2024-02-01"),
            entry("c", "bad date"),
        ]), 1)
        .unwrap();

        let config = crate::config::SiteConfig::default();
        let loader = ContentLoader::new(&config, &src);
        let page = loader.post_page("b", false).await.unwrap().unwrap();

        let out = format_page(&page, &config.date_format);
        assert!(out.starts_with("B\nFebruary 1, 2024\n"));
        assert!(out.contains("<p>Body</p>"));
        assert!(out.contains("Previous Post: A [a]"));
        assert!(out.contains("Next Post: C [c]"));
        assert!(out.contains("Invalid date - C [c]"));
    }
}
