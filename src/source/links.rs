//! Link inclusion for entry collections
//!
//! The store answers a query with the matching items plus the entries and
//! assets they link to. Links are replaced in place by the included
//! target, down to the requested include depth. Links without an included
//! target are left as they are.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::content::raw::RawBlogPostEntry;

/// Highest include depth the store accepts
pub const MAX_INCLUDE_DEPTH: u8 = 10;

/// A query response as returned by the store
#[derive(Debug, Default, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub items: Vec<Value>,

    #[serde(default)]
    pub includes: Includes,
}

#[derive(Debug, Default, Deserialize)]
pub struct Includes {
    #[serde(rename = "Entry", default)]
    pub entries: Vec<Value>,

    #[serde(rename = "Asset", default)]
    pub assets: Vec<Value>,
}

type LinkKey = (String, String);
type LinkIndex = HashMap<LinkKey, Value>;

/// Resolve links in a collection and decode its items.
///
/// An item that is not an entry at all is logged and skipped; the rest of
/// the collection is still returned.
pub fn resolve_collection(collection: EntryCollection, include: u8) -> Vec<RawBlogPostEntry> {
    let depth = include.min(MAX_INCLUDE_DEPTH);
    let index = build_index(&collection);

    collection
        .items
        .into_iter()
        .filter_map(|item| {
            let mut path: Vec<LinkKey> = sys_field(&item, "id")
                .map(|id| vec![("Entry".to_string(), id.to_string())])
                .unwrap_or_default();
            let resolved = resolve(item, &index, depth, &mut path);
            decode_entry(resolved)
        })
        .collect()
}

/// Decode one entry, skipping it when it does not have the shape of one
pub(crate) fn decode_entry(value: Value) -> Option<RawBlogPostEntry> {
    match serde_json::from_value::<RawBlogPostEntry>(value) {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::warn!("Skipping malformed entry: {}", e);
            None
        }
    }
}

fn build_index(collection: &EntryCollection) -> LinkIndex {
    let mut index = LinkIndex::new();

    let entries = collection.items.iter().chain(&collection.includes.entries);
    for value in entries {
        if let Some(id) = sys_field(value, "id") {
            index.insert(("Entry".to_string(), id.to_string()), value.clone());
        }
    }
    for value in &collection.includes.assets {
        if let Some(id) = sys_field(value, "id") {
            index.insert(("Asset".to_string(), id.to_string()), value.clone());
        }
    }

    index
}

fn sys_field<'a>(value: &'a Value, name: &str) -> Option<&'a str> {
    value.get("sys")?.get(name)?.as_str()
}

fn link_key(value: &Value) -> Option<LinkKey> {
    if sys_field(value, "type")? != "Link" {
        return None;
    }
    let link_type = sys_field(value, "linkType")?;
    let id = sys_field(value, "id")?;
    Some((link_type.to_string(), id.to_string()))
}

/// Replace links below `value` by their targets.
///
/// `path` holds the entries being resolved above this point; a link back to
/// one of them is left unresolved.
fn resolve(value: Value, index: &LinkIndex, depth: u8, path: &mut Vec<LinkKey>) -> Value {
    if let Some(key) = link_key(&value) {
        if depth == 0 || path.contains(&key) {
            return value;
        }
        let Some(target) = index.get(&key) else {
            return value;
        };
        path.push(key);
        let resolved = resolve(target.clone(), index, depth - 1, path);
        path.pop();
        return resolved;
    }

    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let v = if k == "sys" {
                        v
                    } else {
                        resolve(v, index, depth, path)
                    };
                    (k, v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| resolve(v, index, depth, path))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn link(kind: &str, id: &str) -> Value {
        json!({"sys": {"type": "Link", "linkType": kind, "id": id}})
    }

    fn collection() -> EntryCollection {
        serde_json::from_value(json!({
            "items": [{
                "sys": {"id": "p1", "type": "Entry"},
                "fields": {
                    "slug": "one",
                    "featuredImage": link("Asset", "img"),
                    "author": link("Entry", "author"),
                    "relatedBlogPosts": [link("Entry", "p2"), link("Entry", "missing")],
                    "content": {
                        "nodeType": "document",
                        "content": [{
                            "nodeType": "embedded-entry-block",
                            "data": {"target": link("Entry", "embed")},
                            "content": []
                        }]
                    }
                }
            }, {
                "sys": {"id": "p2", "type": "Entry"},
                "fields": {"slug": "two", "relatedBlogPosts": [link("Entry", "p1")]}
            }],
            "includes": {
                "Entry": [
                    {"sys": {"id": "author", "type": "Entry"},
                     "fields": {"name": "Ada", "avatar": link("Asset", "img")}},
                    {"sys": {"id": "embed", "type": "Entry"},
                     "fields": {"image": link("Asset", "img")}}
                ],
                "Asset": [
                    {"sys": {"id": "img", "type": "Asset"},
                     "fields": {"file": {"url": "//x/img.png"}}}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_depth_one() {
        let entries = resolve_collection(collection(), 1);
        assert_eq!(entries.len(), 2);

        let fields = entries[0].resolved().unwrap();
        assert!(fields.featured_image.as_ref().unwrap().resolved().is_some());

        let author = fields.author.as_ref().unwrap().resolved().unwrap();
        assert_eq!(author.name.as_deref(), Some("Ada"));
        // second level stays a link
        assert!(author.avatar.as_ref().unwrap().resolved().is_none());

        let related = fields.related_blog_posts.as_ref().unwrap();
        assert_eq!(related[0].resolved().unwrap().slug.as_deref(), Some("two"));
        assert!(related[1].resolved().is_none());

        let body = fields.content.as_ref().unwrap();
        let target = &body["content"][0]["data"]["target"];
        assert_eq!(target["fields"]["image"]["sys"]["type"], "Link");
    }

    #[test]
    fn test_resolve_depth_two() {
        let entries = resolve_collection(collection(), 2);
        let fields = entries[0].resolved().unwrap();

        let author = fields.author.as_ref().unwrap().resolved().unwrap();
        assert!(author.avatar.as_ref().unwrap().resolved().is_some());

        let body = fields.content.as_ref().unwrap();
        let target = &body["content"][0]["data"]["target"];
        assert_eq!(target["fields"]["image"]["fields"]["file"]["url"], "//x/img.png");
    }

    #[test]
    fn test_cycles_are_bounded() {
        let entries = resolve_collection(collection(), MAX_INCLUDE_DEPTH + 5);
        let two = entries[1].resolved().unwrap();
        let back = two.related_blog_posts.as_ref().unwrap()[0].resolved().unwrap();
        assert_eq!(back.slug.as_deref(), Some("one"));
        // the link from "one" back to "two" closes the cycle and stays a link
        let again = &back.related_blog_posts.as_ref().unwrap()[0];
        assert!(again.resolved().is_none());
    }

    #[test]
    fn test_ring_of_related_posts_stays_small() {
        let ids = ["a", "b", "c", "d", "e", "f"];
        let items: Vec<Value> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let related: Vec<Value> = (1..=3)
                    .map(|step| link("Entry", ids[(i + step) % ids.len()]))
                    .collect();
                json!({
                    "sys": {"id": id, "type": "Entry"},
                    "fields": {"slug": id, "relatedBlogPosts": related}
                })
            })
            .collect();
        let collection: EntryCollection =
            serde_json::from_value(json!({ "items": items })).unwrap();

        let entries = resolve_collection(collection, MAX_INCLUDE_DEPTH);
        assert_eq!(entries.len(), 6);
        let size = serde_json::to_string(&entries[0]).unwrap().len();
        assert!(size < 1_000_000, "resolved entry is {} bytes", size);
    }

    #[test]
    fn test_malformed_item_is_skipped() {
        let collection: EntryCollection = serde_json::from_value(json!({
            "items": [
                {"sys": {"id": "good", "type": "Entry"}, "fields": {"slug": "good"}},
                "not an entry",
                {"sys": {"id": "odd", "type": "Entry"},
                 "fields": {"slug": "odd", "seoFields": {"sys": {"id": "s"}, "fields": {"nofollow": "yes"}}}}
            ]
        }))
        .unwrap();

        let entries = resolve_collection(collection, 1);
        let slugs: Vec<&str> = entries
            .iter()
            .map(|e| e.resolved().unwrap().slug.as_deref().unwrap())
            .collect();
        assert_eq!(slugs, vec!["good", "odd"]);
    }

    #[test]
    fn test_depth_zero_leaves_links() {
        let entries = resolve_collection(collection(), 0);
        let fields = entries[0].resolved().unwrap();
        assert!(fields.featured_image.as_ref().unwrap().resolved().is_none());
    }
}
