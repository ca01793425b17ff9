//! Render a rich text document file

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::richtext::{html, render_document, Document};

/// Render a rich text JSON document to HTML on stdout
pub fn run(path: &Path, json: bool) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {:?}", path))?;

    let nodes = render_document(&Document::from_value(&value));

    if json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
    } else {
        println!("{}", html::to_html(&nodes));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(
            &path,
            r#"{"nodeType":"document","content":[{"nodeType":"paragraph","content":[{"nodeType":"text","value":"x","marks":[]}]}]}"#,
        )
        .unwrap();

        assert!(run(&path, false).is_ok());
        assert!(run(&path, true).is_ok());
        assert!(run(&dir.path().join("missing.json"), false).is_err());
    }
}
