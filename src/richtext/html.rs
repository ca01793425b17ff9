//! HTML serialization of rendered rich text

use super::render::PresentationNode;
use crate::helpers::html_escape;

/// Elements written without a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img"];

/// Serialize presentation nodes to an HTML fragment
pub fn to_html(nodes: &[PresentationNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_node(&mut out, node);
    }
    out
}

fn push_node(out: &mut String, node: &PresentationNode) {
    match node {
        PresentationNode::Text { value } => out.push_str(&html_escape(value)),
        PresentationNode::Element {
            tag,
            attributes,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attributes {
                out.push_str(&format!(r#" {}="{}""#, name, html_escape(value)));
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }

            for child in children {
                push_node(out, child);
            }
            out.push_str(&format!("</{}>", tag));
        }
    }
}
