//! Raw entry and asset shapes as delivered by the content store
//!
//! Every field is optional. A reference that the store did not include
//! arrives with `sys` only and no `fields`; that is how an unresolved link
//! is told apart from a resolved entry or asset. A field whose value has the
//! wrong shape decodes as absent, so one bad field never loses its entry.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// System metadata carried by every entry, asset and link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub id: String,

    /// `Entry`, `Asset` or `Link`
    #[serde(rename = "type", default, deserialize_with = "lenient_or_default")]
    pub kind: String,

    /// Target kind when `kind` is `Link`
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<ContentTypeRef>,
}

impl Sys {
    /// Content type id of an entry, if the store reported one
    pub fn content_type_id(&self) -> Option<&str> {
        self.content_type.as_ref().map(|c| c.sys.id.as_str())
    }
}

/// Link to a content type inside `sys`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeRef {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub sys: ContentTypeSys,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeSys {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub id: String,
}

/// An entry or asset that may or may not have been resolved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "F: DeserializeOwned"))]
pub struct Linked<F> {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub sys: Sys,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub fields: Option<F>,
}

impl<F> Linked<F> {
    /// Resolved fields, or `None` for a bare link
    pub fn resolved(&self) -> Option<&F> {
        self.fields.as_ref()
    }
}

/// Fields of a media asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub file: Option<AssetFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub details: Option<FileDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<ImageDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<u32>,
}

/// Fields of an author entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorFields {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub avatar: Option<RawAsset>,
}

/// Fields of an SEO entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoEntryFields {
    #[serde(default, deserialize_with = "lenient")]
    pub page_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page_description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub canonical_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub nofollow: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub noindex: Option<bool>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub share_images: Option<Vec<RawAsset>>,
}

/// Fields of a blog post entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostFields {
    #[serde(default, deserialize_with = "lenient")]
    pub internal_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<RawAuthor>,
    #[serde(default, deserialize_with = "lenient")]
    pub published_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub featured_image: Option<RawAsset>,
    /// Rich text body, decoded leniently by the normalizer
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub related_blog_posts: Option<Vec<RawBlogPostEntry>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub seo_fields: Option<RawSeoFields>,
}

/// Fields of an entry embedded in a rich text body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedEntryFields {
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<RawAsset>,
    #[serde(default, deserialize_with = "lenient")]
    pub caption: Option<String>,
}

pub type RawAsset = Linked<AssetFields>;
pub type RawAuthor = Linked<AuthorFields>;
pub type RawSeoFields = Linked<SeoEntryFields>;
pub type RawBlogPostEntry = Linked<BlogPostFields>;
pub type RawEmbeddedEntry = Linked<EmbeddedEntryFields>;

/// Decode a field, treating a value of the wrong shape as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::debug!("Ignoring malformed field: {}", e);
            Ok(None)
        }
    }
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Decode a list, dropping elements of the wrong shape.
/// A value that is not a list at all is absent.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}
