//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Contentful space
    pub space_id: String,
    pub environment: String,
    pub access_token: String,
    pub preview_access_token: String,
    pub host: String,
    pub preview_host: String,

    // Content model
    pub content_type: String,
    pub include_depth: u8,
    /// Lowers the related post cap; values above 3 are clamped
    pub related_limit: usize,

    /// Serve draft content through the preview API
    pub preview: bool,

    /// JSON export used instead of the delivery API
    pub offline_export: Option<String>,

    // Date format (chrono syntax)
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            space_id: String::new(),
            environment: "master".to_string(),
            access_token: String::new(),
            preview_access_token: String::new(),
            host: "cdn.contentful.com".to_string(),
            preview_host: "preview.contentful.com".to_string(),

            content_type: "pageBlogPost".to_string(),
            include_depth: 1,
            related_limit: 3,

            preview: false,
            offline_export: None,

            date_format: "%B %-d, %Y".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Apply `CONTENTFUL_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CONTENTFUL_SPACE_ID") {
            self.space_id = v;
        }
        if let Some(v) = lookup("CONTENTFUL_ENVIRONMENT") {
            self.environment = v;
        }
        if let Some(v) = lookup("CONTENTFUL_ACCESS_TOKEN") {
            self.access_token = v;
        }
        if let Some(v) = lookup("CONTENTFUL_PREVIEW_ACCESS_TOKEN") {
            self.preview_access_token = v;
        }
        if let Some(v) = lookup("CONTENTFUL_PREVIEW") {
            self.preview = matches!(v.trim(), "1" | "true" | "TRUE" | "yes");
        }
        self
    }

    /// Host serving the requested API
    pub fn api_host(&self, preview: bool) -> &str {
        if preview {
            &self.preview_host
        } else {
            &self.host
        }
    }

    /// Token for the requested API
    pub fn api_token(&self, preview: bool) -> &str {
        if preview {
            &self.preview_access_token
        } else {
            &self.access_token
        }
    }
}
