//! Raw entries shared by tests

use serde_json::{json, Value};

use super::raw::RawBlogPostEntry;

pub fn entry(value: Value) -> RawBlogPostEntry {
    serde_json::from_value(value).unwrap()
}

/// A minimal blog post entry whose body is one paragraph with a bold "Hi"
pub fn post_value(slug: &str, title: &str, date: &str, tags: &[&str]) -> Value {
    json!({
        "sys": {
            "id": format!("id-{}", slug),
            "type": "Entry",
            "contentType": {"sys": {"id": "pageBlogPost"}}
        },
        "fields": {
            "internalName": title,
            "slug": slug,
            "title": title,
            "publishedDate": date,
            "tags": tags,
            "content": {
                "nodeType": "document",
                "data": {},
                "content": [{
                    "nodeType": "paragraph",
                    "data": {},
                    "content": [{
                        "nodeType": "text",
                        "value": "Hi",
                        "marks": [{"type": "bold"}],
                        "data": {}
                    }]
                }]
            }
        }
    })
}

pub fn post(slug: &str, title: &str, date: &str, tags: &[&str]) -> RawBlogPostEntry {
    entry(post_value(slug, title, date, tags))
}

fn image(id: &str, file: &str, width: u32, height: u32) -> Value {
    json!({
        "sys": {"id": id, "type": "Asset"},
        "fields": {
            "title": "Share card",
            "file": {
                "url": format!("//images.example.com/{}", file),
                "details": {"image": {"width": width, "height": height}}
            }
        }
    })
}

/// A post with author, SEO entry, featured image and a linked related post
pub fn full_post() -> RawBlogPostEntry {
    let mut value = post_value("full", "Full post", "2024-02-01", &["rust", "cms"]);
    let fields = value["fields"].as_object_mut().unwrap();
    fields.insert("internalName".into(), json!("Full post"));
    fields.insert("shortDescription".into(), json!("Everything at once"));
    fields.insert("featuredImage".into(), image("cover", "cover.jpg", 1600, 900));
    fields.insert(
        "author".into(),
        json!({
            "sys": {"id": "ada", "type": "Entry"},
            "fields": {"name": "Ada", "avatar": image("ada", "ada.png", 64, 64)}
        }),
    );
    fields.insert(
        "seoFields".into(),
        json!({
            "sys": {"id": "seo", "type": "Entry"},
            "fields": {
                "pageTitle": "Full post | Blog",
                "noindex": true,
                "shareImages": [image("share", "share.png", 1200, 630)]
            }
        }),
    );
    fields.insert(
        "relatedBlogPosts".into(),
        json!([{
            "sys": {"id": "linked", "type": "Entry"},
            "fields": {
                "slug": "linked",
                "title": "Linked post",
                "publishedDate": "2023-12-01",
                "featuredImage": {"sys": {"type": "Link", "linkType": "Asset", "id": "nope"}}
            }
        }]),
    );
    entry(value)
}
