//! Relation resolution - adjacent posts and related posts by tag

use std::cmp::Ordering;

use super::post::{BlogPost, RelatedPostSummary};
use crate::helpers::parse_date_string;

/// Upper bound on related posts attached to a post
pub const MAX_RELATED_POSTS: usize = 3;

/// Posts immediately before and after a target in an ordered collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacent<'a> {
    pub previous: Option<&'a BlogPost>,
    pub next: Option<&'a BlogPost>,
}

/// Find the neighbours of `slug` in `posts`.
///
/// The collection order is the caller's. When the slug occurs more than
/// once the last occurrence wins; when it is missing both sides are absent.
pub fn adjacent<'a>(posts: &'a [BlogPost], slug: &str) -> Adjacent<'a> {
    let Some(pos) = posts.iter().rposition(|p| p.slug == slug) else {
        return Adjacent {
            previous: None,
            next: None,
        };
    };

    Adjacent {
        previous: pos.checked_sub(1).map(|i| &posts[i]),
        next: posts.get(pos + 1),
    }
}

/// Pick at most `limit` related posts from tag-matched candidates.
///
/// The target itself is never included and duplicate slugs collapse.
/// Ordering is newest first, then by slug, so repeated calls over the same
/// data agree regardless of the order the store returned.
pub fn select_related(
    target_slug: &str,
    candidates: &[BlogPost],
    limit: usize,
) -> Vec<RelatedPostSummary> {
    let mut picked: Vec<&BlogPost> = Vec::new();
    for post in candidates {
        if post.slug != target_slug && !picked.iter().any(|p| p.slug == post.slug) {
            picked.push(post);
        }
    }

    picked.sort_by(|a, b| newest_first(a, b));
    picked.truncate(limit);
    picked.into_iter().map(BlogPost::summary).collect()
}

/// Attach tag-resolved relations to a post.
///
/// An empty result never replaces relations the post already links to.
pub fn attach_related(post: BlogPost, related: Vec<RelatedPostSummary>) -> BlogPost {
    if related.is_empty() && post.has_related_posts() {
        return post;
    }
    post.with_related_posts(related)
}

/// Publish date descending, undated posts last, ties broken by slug
pub fn newest_first(a: &BlogPost, b: &BlogPost) -> Ordering {
    let da = parse_date_string(&a.published_date);
    let db = parse_date_string(&b.published_date);

    let by_date = match (da, db) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_date.then_with(|| a.slug.cmp(&b.slug))
}
