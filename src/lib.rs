//! contentful-blog: blog content from a headless CMS
//!
//! This crate fetches blog post entries from Contentful, normalizes them
//! into a strict post model, resolves related and adjacent posts, and
//! renders rich text bodies into a presentation tree.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod richtext;
pub mod source;

pub use content::{BlogPost, ContentLoader, PostPage};
pub use error::{Error, Result};
pub use richtext::{render_document, PresentationNode};

use std::path::{Path, PathBuf};

use source::{ContentSource, DeliveryClient, MemorySource};

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self {
            config: config.with_env_overrides(),
            base_dir,
        })
    }

    /// Open the configured content source
    pub fn source(&self) -> Result<Box<dyn ContentSource>> {
        match &self.config.offline_export {
            Some(export) => {
                let path = self.base_dir.join(export);
                tracing::info!("Reading content from {:?}", path);
                Ok(Box::new(MemorySource::from_export(path, self.config.include_depth)?))
            }
            None => Ok(Box::new(DeliveryClient::new(self.config.clone())?)),
        }
    }

    /// Whether draft content should be served
    pub fn preview(&self, requested: bool) -> bool {
        requested || self.config.preview
    }
}
