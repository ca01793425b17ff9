//! Rich text module - document tree, rendering and HTML output

mod document;
pub mod html;
mod render;

pub use document::{Document, Mark, MarkKind, Node, NodeKind};
pub use render::{
    render_document, MarkRenderer, NodeRenderer, PresentationNode, RenderOptions,
    RichTextRenderer,
};
