//! Entry normalization - raw store entries into the post model
//!
//! Every function here is total: absent or unresolved data becomes an
//! absent field, never an error.

use super::image::{asset_url, dimensions, normalize_image};
use super::post::{Author, BlogPost, RelatedPostSummary, SeoFields, ShareImage};
use super::raw::{RawAsset, RawAuthor, RawBlogPostEntry, RawSeoFields};
use crate::richtext::Document;

/// Normalize a blog post entry.
///
/// Returns `None` when there is no entry (the not-found signal) or when the
/// entry is a bare link without fields.
pub fn normalize_post(entry: Option<&RawBlogPostEntry>) -> Option<BlogPost> {
    let entry = entry?;
    let Some(fields) = entry.resolved() else {
        tracing::debug!("Skipping unresolved blog post link {}", entry.sys.id);
        return None;
    };

    let content = fields
        .content
        .as_ref()
        .map(Document::from_value)
        .unwrap_or_default();

    let related_blog_posts = fields
        .related_blog_posts
        .as_ref()
        .map(|related| related.iter().filter_map(summarize).collect());

    Some(BlogPost {
        internal_name: fields.internal_name.clone().unwrap_or_default(),
        slug: fields.slug.clone().unwrap_or_default(),
        title: fields.title.clone().unwrap_or_default(),
        author: fields.author.as_ref().and_then(normalize_author),
        published_date: fields.published_date.clone().unwrap_or_default(),
        short_description: fields.short_description.clone(),
        featured_image: normalize_image(fields.featured_image.as_ref()),
        content,
        tags: fields.tags.clone(),
        related_blog_posts,
        seo_fields: fields.seo_fields.as_ref().and_then(normalize_seo),
    })
}

/// Project a linked post to a summary without normalizing its body or
/// following its own relations
pub fn summarize(entry: &RawBlogPostEntry) -> Option<RelatedPostSummary> {
    let fields = entry.resolved()?;

    Some(RelatedPostSummary {
        slug: fields.slug.clone().unwrap_or_default(),
        title: fields.title.clone().unwrap_or_default(),
        short_description: fields.short_description.clone(),
        published_date: fields.published_date.clone().unwrap_or_default(),
        featured_image: normalize_image(fields.featured_image.as_ref()),
    })
}

fn normalize_author(author: &RawAuthor) -> Option<Author> {
    let fields = author.resolved()?;

    Some(Author {
        name: fields.name.clone().unwrap_or_default(),
        avatar: normalize_image(fields.avatar.as_ref()),
    })
}

fn normalize_seo(seo: &RawSeoFields) -> Option<SeoFields> {
    let fields = seo.resolved()?;

    Some(SeoFields {
        page_title: fields.page_title.clone().unwrap_or_default(),
        page_description: fields.page_description.clone(),
        canonical_url: fields.canonical_url.clone(),
        nofollow: fields.nofollow.unwrap_or(false),
        noindex: fields.noindex.unwrap_or(false),
        share_images: fields
            .share_images
            .as_ref()
            .map(|images| images.iter().filter_map(share_image).collect()),
    })
}

fn share_image(asset: &RawAsset) -> Option<ShareImage> {
    let fields = asset.resolved()?;
    let (width, height) = dimensions(fields);

    Some(ShareImage {
        src: asset_url(fields),
        width,
        height,
        alt: fields.title.clone().unwrap_or_default(),
    })
}
