//! Blog post model

use serde::{Deserialize, Serialize};

use super::image::ImageRef;
use crate::richtext::Document;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Editorial name, not shown to readers
    pub internal_name: String,

    /// Slug (routing key)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Post author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    /// Publication date as stored
    pub published_date: String,

    /// Teaser text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    pub featured_image: Option<ImageRef>,

    /// Rich text body
    pub content: Document,

    /// Post tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Related posts, either linked directly or found by tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_blog_posts: Option<Vec<RelatedPostSummary>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_fields: Option<SeoFields>,
}

impl BlogPost {
    /// Whether the post carries at least one tag
    pub fn has_tags(&self) -> bool {
        self.tags.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Whether the post already has related posts attached
    pub fn has_related_posts(&self) -> bool {
        self.related_blog_posts
            .as_ref()
            .is_some_and(|r| !r.is_empty())
    }

    /// Return a copy of this post with the given related posts attached
    pub fn with_related_posts(self, related: Vec<RelatedPostSummary>) -> Self {
        Self {
            related_blog_posts: Some(related),
            ..self
        }
    }

    /// Project this post to a related post summary
    pub fn summary(&self) -> RelatedPostSummary {
        RelatedPostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            short_description: self.short_description.clone(),
            published_date: self.published_date.clone(),
            featured_image: self.featured_image.clone(),
        }
    }
}

/// Post author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: Option<ImageRef>,
}

/// Search engine metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoFields {
    pub page_title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,

    pub nofollow: bool,
    pub noindex: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_images: Option<Vec<ShareImage>>,
}

/// Image used when a post is shared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareImage {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Flat projection of a related post.
///
/// Holds no author, body, tags or relations of its own, so following a
/// relation never expands further posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPostSummary {
    pub slug: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    pub published_date: String,
    pub featured_image: Option<ImageRef>,
}
