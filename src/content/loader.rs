//! Content loader - fetches entries and turns them into posts

use super::normalize::normalize_post;
use super::post::BlogPost;
use super::relations::{adjacent, attach_related, select_related, MAX_RELATED_POSTS};
use crate::config::SiteConfig;
use crate::source::{ContentSource, NEWEST_FIRST};
use crate::Result;

/// A post together with its neighbours in the full collection
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    pub post: BlogPost,
    pub previous: Option<BlogPost>,
    pub next: Option<BlogPost>,
}

/// Loads posts from a content source
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
    source: &'a dyn ContentSource,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(config: &'a SiteConfig, source: &'a dyn ContentSource) -> Self {
        Self { config, source }
    }

    /// Load all posts, newest first
    pub async fn all_posts(&self, preview: bool) -> Result<Vec<BlogPost>> {
        let entries = self
            .source
            .fetch_collection(
                &self.config.content_type,
                self.config.include_depth,
                &[NEWEST_FIRST],
                preview,
            )
            .await
            .map_err(|e| {
                tracing::error!("Error fetching blog posts: {}", e);
                e
            })?;

        let posts: Vec<BlogPost> = entries
            .iter()
            .filter_map(|entry| normalize_post(Some(entry)))
            .collect();

        tracing::debug!("Loaded {} posts", posts.len());
        Ok(posts)
    }

    /// Load a single post by slug, with related posts resolved by tag.
    ///
    /// `Ok(None)` means there is no such post.
    pub async fn post_by_slug(&self, slug: &str, preview: bool) -> Result<Option<BlogPost>> {
        self.load_post(slug, preview).await.map_err(|e| {
            tracing::error!("Error fetching blog post {:?}: {}", slug, e);
            e
        })
    }

    async fn load_post(&self, slug: &str, preview: bool) -> Result<Option<BlogPost>> {
        let entry = self
            .source
            .fetch_by_slug(
                &self.config.content_type,
                slug,
                self.config.include_depth,
                preview,
            )
            .await?;

        let Some(post) = normalize_post(entry.as_ref()) else {
            tracing::debug!("No post with slug {:?}", slug);
            return Ok(None);
        };

        if !post.has_tags() {
            return Ok(Some(post));
        }
        let tags = post.tags.clone().unwrap_or_default();
        let limit = self.config.related_limit.min(MAX_RELATED_POSTS);

        let entries = self
            .source
            .fetch_by_tags_excluding_slug(
                &self.config.content_type,
                &tags,
                slug,
                limit,
                self.config.include_depth,
                preview,
            )
            .await?;

        let candidates: Vec<BlogPost> = entries
            .iter()
            .filter_map(|entry| normalize_post(Some(entry)))
            .collect();
        let related = select_related(slug, &candidates, limit);
        tracing::debug!("Found {} related posts for {:?}", related.len(), slug);

        Ok(Some(attach_related(post, related)))
    }

    /// Load a post with its previous and next posts.
    ///
    /// The post and the collection are fetched concurrently.
    pub async fn post_page(&self, slug: &str, preview: bool) -> Result<Option<PostPage>> {
        let (post, posts) =
            tokio::try_join!(self.post_by_slug(slug, preview), self.all_posts(preview))?;

        let Some(post) = post else {
            return Ok(None);
        };

        let adj = adjacent(&posts, &post.slug);
        Ok(Some(PostPage {
            previous: adj.previous.cloned(),
            next: adj.next.cloned(),
            post,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures;
    use crate::content::raw::RawBlogPostEntry;
    use crate::source::{EntryQuery, MemorySource};
    use crate::Error;
    use async_trait::async_trait;

    fn source() -> MemorySource {
        MemorySource::new(vec![
            fixtures::post("hello", "Hello", "2024-01-01", &["go"]),
            fixtures::post("other-go", "Other Go", "2024-02-01", &["go"]),
            fixtures::post("rusty", "Rusty", "2024-03-01", &["rust"]),
            fixtures::post("go-2", "Go 2", "2023-05-01", &["go"]),
            fixtures::post("go-3", "Go 3", "2023-04-01", &["go", "rust"]),
            fixtures::post("go-4", "Go 4", "2023-03-01", &["go"]),
            fixtures::post("untagged", "Untagged", "2022-01-01", &[]),
        ])
    }

    struct FailingSource;

    #[async_trait]
    impl ContentSource for FailingSource {
        async fn fetch_entries(&self, _query: &EntryQuery) -> Result<Vec<RawBlogPostEntry>> {
            Err(Error::Query {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_all_posts() {
        let config = SiteConfig::default();
        let src = source();
        let loader = ContentLoader::new(&config, &src);

        let posts = loader.all_posts(false).await.unwrap();
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["rusty", "other-go", "hello", "go-2", "go-3", "go-4", "untagged"]
        );
    }

    #[tokio::test]
    async fn test_post_by_slug_with_related() {
        let config = SiteConfig::default();
        let src = source();
        let loader = ContentLoader::new(&config, &src);

        let post = loader.post_by_slug("hello", false).await.unwrap().unwrap();
        assert_eq!(post.title, "Hello");

        let related = post.related_blog_posts.unwrap();
        let slugs: Vec<&str> = related.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["other-go", "go-2", "go-3"]);
        assert!(related.len() <= 3);
        assert!(!slugs.contains(&"hello"));
    }

    #[tokio::test]
    async fn test_post_without_tags_keeps_no_relations() {
        let config = SiteConfig::default();
        let src = source();
        let loader = ContentLoader::new(&config, &src);

        let post = loader.post_by_slug("untagged", false).await.unwrap().unwrap();
        assert!(post.related_blog_posts.is_none());
    }

    #[tokio::test]
    async fn test_missing_post() {
        let config = SiteConfig::default();
        let src = source();
        let loader = ContentLoader::new(&config, &src);

        assert!(loader.post_by_slug("nope", false).await.unwrap().is_none());
        assert!(loader.post_page("nope", false).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_hello_scenario() {
        let config = SiteConfig::default();
        let src = MemorySource::new(vec![
            fixtures::post("hello", "Hello", "2024-01-01", &["go"]),
            fixtures::post("gopher", "Gopher", "2023-01-01", &["go"]),
        ]);
        let loader = ContentLoader::new(&config, &src);

        let post = loader.post_by_slug("hello", false).await.unwrap().unwrap();
        assert_eq!(post.content.content.len(), 1);
        assert_eq!(post.content.content[0].content[0].marks[0].kind, "bold");
        let related = post.related_blog_posts.unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].slug, "gopher");
    }

    #[tokio::test]
    async fn test_post_page_adjacency() {
        let config = SiteConfig::default();
        let src = source();
        let loader = ContentLoader::new(&config, &src);

        let page = loader.post_page("hello", false).await.unwrap().unwrap();
        assert_eq!(page.post.slug, "hello");
        assert_eq!(page.previous.unwrap().slug, "other-go");
        assert_eq!(page.next.unwrap().slug, "go-2");

        let first = loader.post_page("rusty", false).await.unwrap().unwrap();
        assert!(first.previous.is_none());
        assert_eq!(first.next.unwrap().slug, "other-go");
    }

    #[tokio::test]
    async fn test_fetch_errors_propagate() {
        let config = SiteConfig::default();
        let loader = ContentLoader::new(&config, &FailingSource);

        let err = loader.all_posts(false).await.unwrap_err();
        assert!(matches!(err, Error::Query { status: 503, .. }));

        let err = loader.post_by_slug("hello", false).await.unwrap_err();
        assert!(matches!(err, Error::Query { .. }));

        assert!(loader.post_page("hello", false).await.is_err());
    }

    #[tokio::test]
    async fn test_related_limit_from_config() {
        let config = SiteConfig {
            related_limit: 1,
            ..Default::default()
        };
        let src = source();
        let loader = ContentLoader::new(&config, &src);

        let post = loader.post_by_slug("hello", false).await.unwrap().unwrap();
        assert_eq!(post.related_blog_posts.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_related_limit_never_exceeds_three() {
        let config = SiteConfig {
            related_limit: 10,
            ..Default::default()
        };
        let src = source();
        let loader = ContentLoader::new(&config, &src);

        // four other posts share the "go" tag
        let post = loader.post_by_slug("hello", false).await.unwrap().unwrap();
        let related = post.related_blog_posts.unwrap();
        let slugs: Vec<&str> = related.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["other-go", "go-2", "go-3"]);
    }
}
