//! Rich text document tree

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::raw::RawEmbeddedEntry;

/// Root of a rich text document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default = "document_node_type")]
    pub node_type: String,

    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(default)]
    pub content: Vec<Node>,
}

fn document_node_type() -> String {
    "document".to_string()
}

fn object_or_empty(value: Option<&Value>) -> Map<String, Value> {
    value.and_then(Value::as_object).cloned().unwrap_or_default()
}

impl Default for Document {
    fn default() -> Self {
        Self {
            node_type: document_node_type(),
            data: Map::new(),
            content: Vec::new(),
        }
    }
}

impl Document {
    /// Create a document from top-level block nodes
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }

    /// Decode a document from raw JSON.
    ///
    /// Decoding is per node: a node that cannot be read is dropped and its
    /// siblings are kept. A body that is not a document at all yields an
    /// empty document rather than an error.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            tracing::warn!("Rich text body is not an object, treating as empty");
            return Document::default();
        };

        let content = match map.get("content") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().filter_map(Node::from_value).collect(),
            Some(_) => {
                tracing::warn!("Rich text body has no node list, treating as empty");
                Vec::new()
            }
        };

        Self {
            node_type: map
                .get("nodeType")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(document_node_type),
            data: object_or_empty(map.get("data")),
            content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A block, inline or text node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub node_type: String,

    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,

    /// Text of a text node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Marks applied to a text node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl Node {
    /// Create a container node
    pub fn block(node_type: &str, content: Vec<Node>) -> Self {
        Self {
            node_type: node_type.to_string(),
            content,
            ..Default::default()
        }
    }

    /// Create a text node
    pub fn text(value: &str, marks: &[&str]) -> Self {
        Self {
            node_type: "text".to_string(),
            value: Some(value.to_string()),
            marks: marks.iter().map(|m| Mark::new(m)).collect(),
            ..Default::default()
        }
    }

    /// Create a hyperlink node
    pub fn hyperlink(uri: &str, content: Vec<Node>) -> Self {
        let mut data = Map::new();
        data.insert("uri".to_string(), Value::String(uri.to_string()));
        Self {
            node_type: "hyperlink".to_string(),
            data,
            content,
            ..Default::default()
        }
    }

    /// Create an embedded entry node around a raw target
    pub fn embedded_entry(target: Value) -> Self {
        let mut data = Map::new();
        data.insert("target".to_string(), target);
        Self {
            node_type: "embedded-entry-block".to_string(),
            data,
            ..Default::default()
        }
    }

    /// Decode a node from raw JSON, reading each property on its own.
    ///
    /// Properties of the wrong shape fall back to their defaults; only a
    /// value that is not an object is rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        let Some(map) = value.as_object() else {
            tracing::warn!("Dropping malformed rich text node: {}", value);
            return None;
        };

        let list = |key: &str| map.get(key).and_then(Value::as_array);

        Some(Self {
            node_type: map
                .get("nodeType")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            data: object_or_empty(map.get("data")),
            content: list("content")
                .map(|items| items.iter().filter_map(Node::from_value).collect())
                .unwrap_or_default(),
            value: map.get("value").and_then(Value::as_str).map(str::to_string),
            marks: list("marks")
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|m| m.get("type").and_then(Value::as_str))
                        .map(Mark::new)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::from_tag(&self.node_type)
    }

    /// Link target of a hyperlink node
    pub fn uri(&self) -> Option<&str> {
        self.data.get("uri").and_then(Value::as_str)
    }

    /// Embedded entry referenced by this node, if it has the expected shape
    pub fn target(&self) -> Option<RawEmbeddedEntry> {
        let target = self.data.get("target")?;
        serde_json::from_value(target.clone()).ok()
    }
}

/// Node types known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading(u8),
    OrderedList,
    UnorderedList,
    ListItem,
    Hr,
    Quote,
    EmbeddedEntry,
    Hyperlink,
    Text,
    Unknown,
}

impl NodeKind {
    /// Map a node type tag to its kind
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "document" => NodeKind::Document,
            "paragraph" => NodeKind::Paragraph,
            "ordered-list" => NodeKind::OrderedList,
            "unordered-list" => NodeKind::UnorderedList,
            "list-item" => NodeKind::ListItem,
            "hr" => NodeKind::Hr,
            "blockquote" => NodeKind::Quote,
            "embedded-entry-block" => NodeKind::EmbeddedEntry,
            "hyperlink" => NodeKind::Hyperlink,
            "text" => NodeKind::Text,
            _ => match tag.strip_prefix("heading-").and_then(|l| l.parse::<u8>().ok()) {
                Some(level @ 1..=6) => NodeKind::Heading(level),
                _ => NodeKind::Unknown,
            },
        }
    }
}

/// A mark on a text run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Mark {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
        }
    }
}

/// Marks known to the renderer, in nesting order (outermost first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
}

impl MarkKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "bold" => Some(MarkKind::Bold),
            "italic" => Some(MarkKind::Italic),
            "underline" => Some(MarkKind::Underline),
            _ => None,
        }
    }
}
