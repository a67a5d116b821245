// src/models/document.rs
// The typed document tree handed to the drawing core

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use super::geometry::Viewport;
use crate::error::LoadError;

pub const DEFAULT_FILL: &str = "#000000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub viewport: Viewport,
    pub nodes: Vec<Node>,
}

/// A tree node, resolved once at load time so nothing downstream has to look
/// at tag names again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Group(Group),
    Path(PathNode),
    Other { tag: String },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    #[serde(default)]
    pub d: Option<String>,
}

impl Node {
    pub fn path(d: &str) -> Self {
        Node::Path(PathNode {
            d: Some(d.to_string()),
        })
    }

    /// Children visited by the traversal. Only groups have any.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group(group) => &group.children,
            _ => &[],
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Node::Group(_) => "g",
            Node::Path(_) => "path",
            Node::Other { tag } => tag,
        }
    }
}

impl Document {
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let document: Document = serde_json::from_str(content)?;
        document.viewport.check_extent()?;
        Ok(document)
    }

    pub fn group_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Group(_))).count()
    }
}

/// A fill color as written in the document, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: &str) -> Self {
        Color(value.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes `#RGB` and `#RRGGBB` forms. Named colors are not understood.
    pub fn to_rgb8(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => Some((
                u8::from_str_radix(&hex[0..2], 16).ok()?,
                u8::from_str_radix(&hex[2..4], 16).ok()?,
                u8::from_str_radix(&hex[4..6], 16).ok()?,
            )),
            3 => {
                let mut channels = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some((channels.next()??, channels.next()??, channels.next()??))
            }
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color(DEFAULT_FILL.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod color_tests {
        use super::*;

        #[test]
        fn test_color_normalized_to_upper_case() {
            assert_eq!(Color::new(" #ff00aa ").as_str(), "#FF00AA");
            assert_eq!(Color::default().as_str(), "#000000");
        }

        #[test]
        fn test_color_decodes_hex_forms() {
            assert_eq!(Color::new("#ff8000").to_rgb8(), Some((255, 128, 0)));
            assert_eq!(Color::new("#0f0").to_rgb8(), Some((0, 255, 0)));
            assert_eq!(Color::new("red").to_rgb8(), None);
            assert_eq!(Color::new("#12345").to_rgb8(), None);
            assert_eq!(Color::new("#GG0000").to_rgb8(), None);
        }
    }

    #[test]
    fn test_document_from_json() {
        let document = Document::from_json_str(
            r##"{
                "viewport": { "min_x": 0, "min_y": 0, "width": 100, "height": 50 },
                "nodes": [
                    { "type": "group", "fill": "#ff0000", "children": [
                        { "type": "path", "d": "M0 0 l10 0" },
                        { "type": "other", "tag": "circle" }
                    ] },
                    { "type": "other", "tag": "defs" }
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(document.viewport.width, 100.0);
        assert_eq!(document.group_count(), 1);
        assert_eq!(document.nodes[0].children().len(), 2);
        assert_eq!(document.nodes[0].children()[0], Node::path("M0 0 l10 0"));
        assert_eq!(document.nodes[1].tag(), "defs");
        assert!(document.nodes[1].children().is_empty());
    }

    #[test]
    fn test_document_json_rejects_empty_viewport() {
        let result = Document::from_json_str(
            r#"{ "viewport": { "min_x": 0, "min_y": 0, "width": 0, "height": 50 }, "nodes": [] }"#,
        );
        assert!(matches!(result, Err(LoadError::Config(_))));
    }
}
