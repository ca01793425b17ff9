//! Rich text rendering
//!
//! Nodes are dispatched by kind through a table of render functions. Each
//! node's children are rendered first and handed to the node's own render
//! function. Kinds missing from the table render to nothing.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::document::{Document, MarkKind, Node, NodeKind};
use crate::content::image::normalize_image;

/// Output tree handed to the view layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PresentationNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<PresentationNode>,
    },
    Text {
        value: String,
    },
}

impl PresentationNode {
    pub fn element(tag: &str, children: Vec<PresentationNode>) -> Self {
        PresentationNode::Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children,
        }
    }

    pub fn text(value: &str) -> Self {
        PresentationNode::Text {
            value: value.to_string(),
        }
    }

    /// Add an attribute to an element; text nodes are returned unchanged
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        if let PresentationNode::Element { attributes, .. } = &mut self {
            attributes.push((name.to_string(), value.to_string()));
        }
        self
    }
}

/// Renders a node given its already rendered children
pub type NodeRenderer =
    Arc<dyn Fn(&Node, Vec<PresentationNode>) -> Vec<PresentationNode> + Send + Sync>;

/// Wraps rendered text in a mark
pub type MarkRenderer = Arc<dyn Fn(Vec<PresentationNode>) -> PresentationNode + Send + Sync>;

/// Dispatch tables for nodes and marks
#[derive(Clone)]
pub struct RenderOptions {
    nodes: HashMap<NodeKind, NodeRenderer>,
    marks: HashMap<MarkKind, MarkRenderer>,
}

impl RenderOptions {
    /// An empty table: every node renders to nothing
    pub fn empty() -> Self {
        Self {
            nodes: HashMap::new(),
            marks: HashMap::new(),
        }
    }

    /// Register or replace the renderer for a node kind
    pub fn with_node<F>(mut self, kind: NodeKind, render: F) -> Self
    where
        F: Fn(&Node, Vec<PresentationNode>) -> Vec<PresentationNode> + Send + Sync + 'static,
    {
        self.nodes.insert(kind, Arc::new(render));
        self
    }

    /// Register or replace the renderer for a mark
    pub fn with_mark<F>(mut self, kind: MarkKind, render: F) -> Self
    where
        F: Fn(Vec<PresentationNode>) -> PresentationNode + Send + Sync + 'static,
    {
        self.marks.insert(kind, Arc::new(render));
        self
    }

    fn with_wrapper(self, kind: NodeKind, tag: &'static str) -> Self {
        self.with_node(kind, move |_, children| {
            vec![PresentationNode::element(tag, children)]
        })
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        let mut options = RenderOptions::empty()
            .with_wrapper(NodeKind::Document, "div")
            .with_wrapper(NodeKind::Paragraph, "p")
            .with_wrapper(NodeKind::UnorderedList, "ul")
            .with_wrapper(NodeKind::OrderedList, "ol")
            .with_wrapper(NodeKind::ListItem, "li")
            .with_wrapper(NodeKind::Quote, "blockquote")
            .with_node(NodeKind::Hr, |_, _| vec![PresentationNode::element("hr", Vec::new())])
            .with_node(NodeKind::Hyperlink, render_hyperlink)
            .with_node(NodeKind::EmbeddedEntry, render_embedded_entry)
            .with_mark(MarkKind::Bold, |c| PresentationNode::element("strong", c))
            .with_mark(MarkKind::Italic, |c| PresentationNode::element("em", c))
            .with_mark(MarkKind::Underline, |c| PresentationNode::element("u", c));

        for (level, tag) in ["h1", "h2", "h3", "h4", "h5", "h6"].into_iter().enumerate() {
            options = options.with_wrapper(NodeKind::Heading(level as u8 + 1), tag);
        }

        options
    }
}

fn render_hyperlink(node: &Node, children: Vec<PresentationNode>) -> Vec<PresentationNode> {
    let href = node.uri().unwrap_or_default();
    vec![PresentationNode::element("a", children).with_attr("href", href)]
}

fn render_embedded_entry(node: &Node, _children: Vec<PresentationNode>) -> Vec<PresentationNode> {
    let Some(target) = node.target() else {
        return Vec::new();
    };
    let Some(fields) = target.resolved() else {
        tracing::debug!("Skipping unresolved embedded entry {}", target.sys.id);
        return Vec::new();
    };
    let Some(image) = normalize_image(fields.image.as_ref()) else {
        return Vec::new();
    };

    // Fall back to the asset title, then a generic label
    let alt = if image.alt.is_empty() {
        fields
            .image
            .as_ref()
            .and_then(|a| a.resolved())
            .and_then(|a| a.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Embedded image".to_string())
    } else {
        image.alt.clone()
    };

    let img = PresentationNode::element("img", Vec::new())
        .with_attr("src", &image.src)
        .with_attr("alt", &alt)
        .with_attr("width", &image.width.to_string())
        .with_attr("height", &image.height.to_string());

    let mut children = vec![img];
    if let Some(caption) = fields.caption.as_deref().filter(|c| !c.is_empty()) {
        children.push(PresentationNode::element(
            "figcaption",
            vec![PresentationNode::text(caption)],
        ));
    }

    vec![PresentationNode::element("figure", children)]
}

/// Tree-walking rich text renderer
#[derive(Clone, Default)]
pub struct RichTextRenderer {
    options: RenderOptions,
}

impl RichTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render the top-level blocks of a document
    pub fn render(&self, document: &Document) -> Vec<PresentationNode> {
        self.render_nodes(&document.content)
    }

    fn render_nodes(&self, nodes: &[Node]) -> Vec<PresentationNode> {
        nodes.iter().flat_map(|n| self.render_node(n)).collect()
    }

    /// Render a single node and its subtree
    pub fn render_node(&self, node: &Node) -> Vec<PresentationNode> {
        match node.kind() {
            NodeKind::Text => vec![self.render_text(node)],
            kind => {
                let Some(render) = self.options.nodes.get(&kind) else {
                    tracing::debug!("No renderer for node type {:?}, skipping", node.node_type);
                    return Vec::new();
                };
                let children = self.render_nodes(&node.content);
                render(node, children)
            }
        }
    }

    /// Render a text run, nesting its marks in a fixed order
    fn render_text(&self, node: &Node) -> PresentationNode {
        let marks: BTreeSet<MarkKind> = node
            .marks
            .iter()
            .filter_map(|m| MarkKind::from_tag(&m.kind))
            .collect();

        let text = PresentationNode::text(node.value.as_deref().unwrap_or_default());

        marks.iter().rev().fold(text, |inner, mark| {
            match self.options.marks.get(mark) {
                Some(wrap) => wrap(vec![inner]),
                None => inner,
            }
        })
    }
}

/// Render a document with the default node table
pub fn render_document(document: &Document) -> Vec<PresentationNode> {
    RichTextRenderer::new().render(document)
}
