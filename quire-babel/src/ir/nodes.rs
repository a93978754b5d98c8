//! Core data structures for the block document model.
//!
//! The model follows the Tiptap/ProseMirror JSON schema used by the post editor. Block and
//! inline nodes share the [`Node`] sum type because authored documents mix them freely: a
//! paragraph holds text and hard breaks, a blockquote holds paragraphs, a list item holds
//! arbitrary blocks.
//!
//! Serialization goes through the lenient wire representation in [`super::raw`], so decoding
//! never fails on partial nodes; it degrades them instead.

use super::raw::{RawMark, RawNode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Heading level used when a heading carries no usable level.
pub const DEFAULT_HEADING_LEVEL: u8 = 2;

/// Represents the root of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct Document {
    pub content: Vec<Node>,
}

/// A single node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum Node {
    Paragraph { content: Vec<Node> },
    Heading { level: u8, content: Vec<Node> },
    Blockquote { content: Vec<Node> },
    BulletList { items: Vec<Node> },
    OrderedList { items: Vec<Node> },
    ListItem { content: Vec<Node> },
    CodeBlock { language: Option<String>, content: Vec<Node> },
    Image(Image),
    HorizontalRule,
    HardBreak,
    Text(Text),
    /// A node type this model does not know, kept verbatim so it round-trips.
    Unknown(UnknownNode),
}

/// Represents a run of text and the marks applied to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub text: String,
    pub marks: Vec<Mark>,
}

/// Represents an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
    pub title: Option<String>,
}

/// An unrecognized (or structurally incomplete) node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnknownNode {
    pub kind: String,
    pub attrs: Option<Map<String, Value>>,
    pub content: Option<Vec<Node>>,
}

/// Inline formatting annotation carried by a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMark", into = "RawMark")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Link { href: String },
    Highlight,
    /// Unrecognized mark, or a link without an href. Renderers skip it.
    Unknown {
        kind: String,
        attrs: Option<Map<String, Value>>,
    },
}

/// The two list flavours a document can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Bullet,
    Ordered,
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }

    /// True when the document holds no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl Default for Document {
    /// The document an empty post compiles to: a single empty paragraph.
    fn default() -> Self {
        Self::new(vec![Node::Paragraph {
            content: Vec::new(),
        }])
    }
}

impl Node {
    /// Inline content for a line of text. Blank text yields no inline nodes.
    pub fn inline_text(text: &str) -> Vec<Node> {
        if text.trim().is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text {
            text: text.into(),
            marks: Vec::new(),
        })
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text(Text {
            text: text.into(),
            marks,
        })
    }

    pub fn paragraph(text: &str) -> Self {
        Node::Paragraph {
            content: Node::inline_text(text),
        }
    }

    pub fn heading(level: u8, text: &str) -> Self {
        Node::Heading {
            level,
            content: Node::inline_text(text),
        }
    }

    /// A blockquote wrapping a single paragraph.
    pub fn blockquote(text: &str) -> Self {
        Node::Blockquote {
            content: vec![Node::paragraph(text)],
        }
    }

    /// A list of the given kind whose items each hold one paragraph.
    pub fn list<S: AsRef<str>>(kind: ListKind, items: &[S]) -> Self {
        let items = items
            .iter()
            .map(|item| Node::ListItem {
                content: vec![Node::paragraph(item.as_ref())],
            })
            .collect();
        match kind {
            ListKind::Bullet => Node::BulletList { items },
            ListKind::Ordered => Node::OrderedList { items },
        }
    }

    /// The wire type name of this node (`"bulletList"`, `"text"`, ...).
    pub fn type_name(&self) -> &str {
        match self {
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::Blockquote { .. } => "blockquote",
            Node::BulletList { .. } => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem { .. } => "listItem",
            Node::CodeBlock { .. } => "codeBlock",
            Node::Image(_) => "image",
            Node::HorizontalRule => "horizontalRule",
            Node::HardBreak => "hardBreak",
            Node::Text(_) => "text",
            Node::Unknown(unknown) => &unknown.kind,
        }
    }

    /// Child nodes in document order; leaves return an empty slice.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::Blockquote { content }
            | Node::ListItem { content }
            | Node::CodeBlock { content, .. } => content,
            Node::BulletList { items } | Node::OrderedList { items } => items,
            Node::Unknown(unknown) => unknown.content.as_deref().unwrap_or(&[]),
            Node::Image(_) | Node::HorizontalRule | Node::HardBreak | Node::Text(_) => &[],
        }
    }
}

impl Mark {
    /// The wire type name of this mark.
    pub fn type_name(&self) -> &str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Strike => "strike",
            Mark::Code => "code",
            Mark::Link { .. } => "link",
            Mark::Highlight => "highlight",
            Mark::Unknown { kind, .. } => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_is_one_empty_paragraph() {
        let doc = Document::default();
        assert_eq!(
            doc.content,
            vec![Node::Paragraph {
                content: Vec::new()
            }]
        );
    }

    #[test]
    fn blank_text_produces_no_inline_nodes() {
        assert!(Node::inline_text("   ").is_empty());
        assert_eq!(Node::inline_text(" a "), vec![Node::text(" a ")]);
    }

    #[test]
    fn list_builder_wraps_items_in_paragraphs() {
        let list = Node::list(ListKind::Ordered, &["one", "two"]);
        assert_eq!(list.type_name(), "orderedList");
        assert_eq!(list.children().len(), 2);
        assert_eq!(
            list.children()[1],
            Node::ListItem {
                content: vec![Node::paragraph("two")]
            }
        );
    }

    #[test]
    fn unknown_nodes_report_their_raw_type_name() {
        let node = Node::Unknown(UnknownNode {
            kind: "callout".to_string(),
            ..Default::default()
        });
        assert_eq!(node.type_name(), "callout");
        assert!(node.children().is_empty());
    }
}
