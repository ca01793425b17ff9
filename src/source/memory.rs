//! In-memory content source
//!
//! Serves entries from an export file or from values built in code. Queries
//! are answered with the same filter, order and limit semantics as the
//! delivery API.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::Value;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use super::links::{decode_entry, resolve_collection, EntryCollection};
use super::{ContentSource, EntryQuery};
use crate::content::raw::{BlogPostFields, RawBlogPostEntry};
use crate::helpers::parse_date_string;
use crate::Result;

/// Entries held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<RawBlogPostEntry>,
}

impl MemorySource {
    pub fn new(entries: Vec<RawBlogPostEntry>) -> Self {
        Self { entries }
    }

    /// Load an export: either a collection response (`items` + `includes`)
    /// or a plain array of already resolved entries. Links in a collection
    /// are resolved `include` levels deep.
    pub fn from_export<P: AsRef<Path>>(path: P, include: u8) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let value: Value = serde_json::from_str(&content)?;
        Self::from_value(value, include)
    }

    pub fn from_value(value: Value, include: u8) -> Result<Self> {
        let entries: Vec<RawBlogPostEntry> = match value {
            Value::Array(items) => items.into_iter().filter_map(decode_entry).collect(),
            other => {
                let collection: EntryCollection = serde_json::from_value(other)?;
                resolve_collection(collection, include)
            }
        };
        tracing::debug!("Loaded {} entries into memory source", entries.len());
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn fetch_entries(&self, query: &EntryQuery) -> Result<Vec<RawBlogPostEntry>> {
        let mut matched: Vec<RawBlogPostEntry> = self
            .entries
            .iter()
            .filter(|e| matches(e, query))
            .cloned()
            .collect();

        if !query.order.is_empty() {
            matched.sort_by(|a, b| compare(a, b, &query.order));
        }
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        Ok(matched)
    }
}

fn matches(entry: &RawBlogPostEntry, query: &EntryQuery) -> bool {
    if let Some(content_type) = entry.sys.content_type_id() {
        if content_type != query.content_type {
            return false;
        }
    }

    let Some(fields) = entry.resolved() else {
        return false;
    };
    let slug = fields.slug.as_deref();

    if let Some(wanted) = &query.slug {
        if slug != Some(wanted.as_str()) {
            return false;
        }
    }
    if let Some(excluded) = &query.exclude_slug {
        if slug == Some(excluded.as_str()) {
            return false;
        }
    }
    if !query.tags.is_empty() {
        let tags = fields.tags.as_deref().unwrap_or_default();
        if !tags.iter().any(|t| query.tags.contains(t)) {
            return false;
        }
    }

    true
}

fn compare(a: &RawBlogPostEntry, b: &RawBlogPostEntry, order: &[String]) -> Ordering {
    for key in order {
        let (descending, name) = match key.strip_prefix('-') {
            Some(name) => (true, name),
            None => (false, key.as_str()),
        };

        let ord = sort_value(a.resolved(), name).cmp(&sort_value(b.resolved(), name));
        let ord = if descending { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Sort key of an entry field; dates compare chronologically
fn sort_value<'a>(
    fields: Option<&'a BlogPostFields>,
    key: &str,
) -> (Option<NaiveDateTime>, Option<&'a str>) {
    let Some(fields) = fields else {
        return (None, None);
    };
    match key {
        "fields.publishedDate" => {
            let date = fields.published_date.as_deref();
            (date.and_then(parse_date_string), date)
        }
        "fields.slug" => (None, fields.slug.as_deref()),
        "fields.title" => (None, fields.title.as_deref()),
        "fields.internalName" => (None, fields.internal_name.as_deref()),
        _ => (None, None),
    }
}
