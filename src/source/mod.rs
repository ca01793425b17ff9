//! Content sources - where raw entries come from
//!
//! A source answers entry queries against the content store. The delivery
//! client talks to the Contentful API; the memory source serves an export
//! held in memory.

pub mod delivery;
mod links;
pub mod memory;

use async_trait::async_trait;

use crate::content::raw::RawBlogPostEntry;
use crate::Result;

pub use delivery::DeliveryClient;
pub use links::{resolve_collection, EntryCollection};
pub use memory::MemorySource;

/// Order applied to full collection fetches
pub const NEWEST_FIRST: &str = "-fields.publishedDate";

/// Secondary order making ties deterministic
pub const BY_SLUG: &str = "fields.slug";

/// A filtered entry query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryQuery {
    pub content_type: String,
    /// Levels of linked entries and assets to resolve
    pub include: u8,
    /// Sort keys, `-` prefix for descending
    pub order: Vec<String>,
    pub slug: Option<String>,
    pub exclude_slug: Option<String>,
    /// Match entries carrying any of these tags
    pub tags: Vec<String>,
    pub limit: Option<usize>,
    pub preview: bool,
}

impl EntryQuery {
    pub fn new(content_type: &str, include: u8, preview: bool) -> Self {
        Self {
            content_type: content_type.to_string(),
            include,
            preview,
            ..Default::default()
        }
    }

    pub fn order_by(mut self, keys: &[&str]) -> Self {
        self.order = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn slug(mut self, slug: &str) -> Self {
        self.slug = Some(slug.to_string());
        self
    }

    pub fn exclude_slug(mut self, slug: &str) -> Self {
        self.exclude_slug = Some(slug.to_string());
        self
    }

    pub fn tags(mut self, tags: &[String]) -> Self {
        self.tags = tags.to_vec();
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query string parameters in the Contentful search syntax
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("content_type".to_string(), self.content_type.clone()),
            ("include".to_string(), self.include.to_string()),
        ];

        if !self.order.is_empty() {
            params.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(slug) = &self.slug {
            params.push(("fields.slug".to_string(), slug.clone()));
        }
        if let Some(slug) = &self.exclude_slug {
            params.push(("fields.slug[ne]".to_string(), slug.clone()));
        }
        if !self.tags.is_empty() {
            params.push(("fields.tags[in]".to_string(), self.tags.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

/// Access to raw entries in the content store.
///
/// Transport and query faults are returned as errors; an empty result is
/// not a fault.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run an entry query
    async fn fetch_entries(&self, query: &EntryQuery) -> Result<Vec<RawBlogPostEntry>>;

    /// Fetch every entry of a content type in the given order
    async fn fetch_collection(
        &self,
        content_type: &str,
        include: u8,
        order: &[&str],
        preview: bool,
    ) -> Result<Vec<RawBlogPostEntry>> {
        let query = EntryQuery::new(content_type, include, preview).order_by(order);
        self.fetch_entries(&query).await
    }

    /// Fetch the entry with the given slug, if any
    async fn fetch_by_slug(
        &self,
        content_type: &str,
        slug: &str,
        include: u8,
        preview: bool,
    ) -> Result<Option<RawBlogPostEntry>> {
        let query = EntryQuery::new(content_type, include, preview).slug(slug);
        let entries = self.fetch_entries(&query).await?;
        Ok(entries.into_iter().next())
    }

    /// Fetch entries sharing any of `tags`, excluding `exclude_slug`
    async fn fetch_by_tags_excluding_slug(
        &self,
        content_type: &str,
        tags: &[String],
        exclude_slug: &str,
        limit: usize,
        include: u8,
        preview: bool,
    ) -> Result<Vec<RawBlogPostEntry>> {
        let query = EntryQuery::new(content_type, include, preview)
            .tags(tags)
            .exclude_slug(exclude_slug)
            .order_by(&[NEWEST_FIRST, BY_SLUG])
            .limit(limit);
        self.fetch_entries(&query).await
    }
}
