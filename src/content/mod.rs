//! Content module - raw store entries, normalization and relations

pub mod image;
pub mod loader;
pub mod normalize;
mod post;
pub mod raw;
pub mod relations;

#[cfg(test)]
pub(crate) mod fixtures;

pub use image::{normalize_image, ImageRef};
pub use loader::{ContentLoader, PostPage};
pub use normalize::normalize_post;
pub use post::{Author, BlogPost, RelatedPostSummary, SeoFields, ShareImage};
pub use relations::{adjacent, Adjacent};
