//! Contentful delivery and preview API client

use async_trait::async_trait;
use serde::Deserialize;

use super::links::{resolve_collection, EntryCollection};
use super::{ContentSource, EntryQuery};
use crate::config::SiteConfig;
use crate::content::raw::RawBlogPostEntry;
use crate::{Error, Result};

/// HTTP client for the Contentful content APIs
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    http: reqwest::Client,
    config: SiteConfig,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

impl DeliveryClient {
    /// Create a client for the configured space
    pub fn new(config: SiteConfig) -> Result<Self> {
        if config.space_id.trim().is_empty() {
            return Err(Error::Config(
                "space_id is required (set CONTENTFUL_SPACE_ID)".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("contentful-blog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    /// Entries endpoint of the delivery or preview API
    pub fn entries_url(&self, preview: bool) -> String {
        format!(
            "https://{}/spaces/{}/environments/{}/entries",
            self.config.api_host(preview),
            self.config.space_id,
            self.config.environment
        )
    }

    fn token(&self, preview: bool) -> Result<&str> {
        let token = self.config.api_token(preview);
        if token.is_empty() {
            let var = if preview {
                "CONTENTFUL_PREVIEW_ACCESS_TOKEN"
            } else {
                "CONTENTFUL_ACCESS_TOKEN"
            };
            return Err(Error::Config(format!("missing access token (set {})", var)));
        }
        Ok(token)
    }
}

#[async_trait]
impl ContentSource for DeliveryClient {
    async fn fetch_entries(&self, query: &EntryQuery) -> Result<Vec<RawBlogPostEntry>> {
        let url = self.entries_url(query.preview);
        let token = self.token(query.preview)?;

        tracing::debug!("GET {} {:?}", url, query.to_params());
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&query.to_params())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Query {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let collection: EntryCollection = serde_json::from_str(&body)?;
        Ok(resolve_collection(collection, query.include))
    }
}

/// Message from an API error body, or the raw body when it has none
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        SiteConfig {
            space_id: "space1".to_string(),
            access_token: "delivery".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_requires_space() {
        let err = DeliveryClient::new(SiteConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_entries_url() {
        let client = DeliveryClient::new(config()).unwrap();
        assert_eq!(
            client.entries_url(false),
            "https://cdn.contentful.com/spaces/space1/environments/master/entries"
        );
        assert_eq!(
            client.entries_url(true),
            "https://preview.contentful.com/spaces/space1/environments/master/entries"
        );
    }

    #[test]
    fn test_missing_preview_token() {
        let client = DeliveryClient::new(config()).unwrap();
        assert_eq!(client.token(false).unwrap(), "delivery");
        assert!(matches!(client.token(true), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_request() {
        let client = DeliveryClient::new(config()).unwrap();
        let query = EntryQuery::new("pageBlogPost", 1, true);
        let err = client.fetch_entries(&query).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"sys":{"type":"Error","id":"AccessTokenInvalid"},"message":"The access token you sent could not be found or is invalid."}"#),
            "The access token you sent could not be found or is invalid."
        );
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
