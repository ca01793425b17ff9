//! Image references built from store assets

use serde::{Deserialize, Serialize};

use super::raw::{AssetFields, RawAsset};

/// A resolved image, ready for layout code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

/// Normalize an asset into an image reference.
///
/// Returns `None` when the asset is missing or is an unresolved link. A
/// resolved asset always yields a complete value: missing alt text becomes
/// the empty string and missing dimensions become 0.
pub fn normalize_image(asset: Option<&RawAsset>) -> Option<ImageRef> {
    let fields = asset?.resolved()?;
    let (width, height) = dimensions(fields);

    Some(ImageRef {
        src: asset_url(fields),
        alt: fields.description.clone().unwrap_or_default(),
        width,
        height,
    })
}

/// Absolute URL of an asset file, empty when the asset has no file
pub(crate) fn asset_url(fields: &AssetFields) -> String {
    let url = fields
        .file
        .as_ref()
        .and_then(|f| f.url.as_deref())
        .unwrap_or("");
    absolute_url(url)
}

/// Pixel dimensions of an image asset, 0 when unknown
pub(crate) fn dimensions(fields: &AssetFields) -> (u32, u32) {
    let image = fields
        .file
        .as_ref()
        .and_then(|f| f.details.as_ref())
        .and_then(|d| d.image.as_ref());

    match image {
        Some(image) => (image.width.unwrap_or(0), image.height.unwrap_or(0)),
        None => (0, 0),
    }
}

/// Prefix protocol-relative URLs with `https:`; anything else passes through
pub fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}
