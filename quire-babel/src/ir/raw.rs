//! Lenient wire representation of the Tiptap JSON schema.
//!
//! [`RawNode`] mirrors the JSON object shape one to one with every field optional. Fields of the
//! wrong JSON type decode as absent, and array entries that cannot be decoded at all are
//! dropped, so any JSON object decodes. The typed model in [`super::nodes`] is produced from
//! this representation and written back through it.

use super::nodes::{Document, Image, Mark, Node, Text, UnknownNode, DEFAULT_HEADING_LEVEL};
use crate::error::FormatError;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type tag of the document root.
pub const DOC_TYPE: &str = "doc";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub attrs: Option<Map<String, Value>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_list"
    )]
    pub content: Option<Vec<RawNode>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub text: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_list"
    )]
    pub marks: Option<Vec<RawMark>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMark {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub attrs: Option<Map<String, Value>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, String>(deserializer)?.unwrap_or_default())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    let total = entries.len();
    let decoded: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if decoded.len() < total {
        tracing::debug!(
            dropped = total - decoded.len(),
            "dropped undecodable document entries"
        );
    }
    Ok(Some(decoded))
}

fn attr_string(attrs: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    attrs?.get(key)?.as_str().map(str::to_string)
}

fn heading_level(attrs: Option<&Map<String, Value>>) -> u8 {
    let level = attrs.and_then(|attrs| attrs.get("level"));
    let parsed = match level {
        Some(Value::Number(number)) => number.as_u64().and_then(|n| u8::try_from(n).ok()),
        Some(Value::String(text)) => text.trim().parse::<u8>().ok(),
        _ => None,
    };
    parsed
        .filter(|level| *level > 0)
        .unwrap_or(DEFAULT_HEADING_LEVEL)
}

fn decode_children(content: Option<Vec<RawNode>>) -> Vec<Node> {
    content
        .unwrap_or_default()
        .into_iter()
        .map(Node::from)
        .collect()
}

fn encode_children(content: Vec<Node>) -> Vec<RawNode> {
    content.into_iter().map(RawNode::from).collect()
}

impl RawNode {
    fn container(kind: &str, attrs: Option<Map<String, Value>>, content: Vec<Node>) -> Self {
        RawNode {
            kind: kind.to_string(),
            attrs,
            content: (!content.is_empty()).then(|| encode_children(content)),
            ..Default::default()
        }
    }

    fn leaf(kind: &str) -> Self {
        RawNode {
            kind: kind.to_string(),
            ..Default::default()
        }
    }
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let RawNode {
            kind,
            attrs,
            content,
            text,
            marks,
        } = raw;

        match kind.as_str() {
            "text" => Node::Text(Text {
                text: text.unwrap_or_default(),
                marks: marks
                    .unwrap_or_default()
                    .into_iter()
                    .map(Mark::from)
                    .collect(),
            }),
            "paragraph" => Node::Paragraph {
                content: decode_children(content),
            },
            "heading" => Node::Heading {
                level: heading_level(attrs.as_ref()),
                content: decode_children(content),
            },
            "blockquote" => Node::Blockquote {
                content: decode_children(content),
            },
            "bulletList" => Node::BulletList {
                items: decode_children(content),
            },
            "orderedList" => Node::OrderedList {
                items: decode_children(content),
            },
            "listItem" => Node::ListItem {
                content: decode_children(content),
            },
            "codeBlock" => Node::CodeBlock {
                language: attr_string(attrs.as_ref(), "language"),
                content: decode_children(content),
            },
            "image" => match attr_string(attrs.as_ref(), "src") {
                Some(src) => Node::Image(Image {
                    src,
                    alt: attr_string(attrs.as_ref(), "alt"),
                    title: attr_string(attrs.as_ref(), "title"),
                }),
                None => Node::Unknown(UnknownNode {
                    kind: kind.clone(),
                    attrs,
                    content: content.map(|children| decode_children(Some(children))),
                }),
            },
            "horizontalRule" => Node::HorizontalRule,
            "hardBreak" => Node::HardBreak,
            _ => Node::Unknown(UnknownNode {
                kind: kind.clone(),
                attrs,
                content: content.map(|children| decode_children(Some(children))),
            }),
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Paragraph { content } => RawNode::container("paragraph", None, content),
            Node::Heading { level, content } => {
                let mut attrs = Map::new();
                attrs.insert("level".to_string(), Value::from(level));
                RawNode::container("heading", Some(attrs), content)
            }
            Node::Blockquote { content } => RawNode::container("blockquote", None, content),
            Node::BulletList { items } => RawNode::container("bulletList", None, items),
            Node::OrderedList { items } => RawNode::container("orderedList", None, items),
            Node::ListItem { content } => RawNode::container("listItem", None, content),
            Node::CodeBlock { language, content } => {
                let attrs = language.map(|language| {
                    let mut attrs = Map::new();
                    attrs.insert("language".to_string(), Value::from(language));
                    attrs
                });
                RawNode::container("codeBlock", attrs, content)
            }
            Node::Image(Image { src, alt, title }) => {
                let mut attrs = Map::new();
                attrs.insert("src".to_string(), Value::from(src));
                if let Some(alt) = alt {
                    attrs.insert("alt".to_string(), Value::from(alt));
                }
                if let Some(title) = title {
                    attrs.insert("title".to_string(), Value::from(title));
                }
                RawNode {
                    attrs: Some(attrs),
                    ..RawNode::leaf("image")
                }
            }
            Node::HorizontalRule => RawNode::leaf("horizontalRule"),
            Node::HardBreak => RawNode::leaf("hardBreak"),
            Node::Text(Text { text, marks }) => RawNode {
                text: Some(text),
                marks: (!marks.is_empty()).then(|| marks.into_iter().map(RawMark::from).collect()),
                ..RawNode::leaf("text")
            },
            Node::Unknown(UnknownNode {
                kind,
                attrs,
                content,
            }) => RawNode {
                kind,
                attrs,
                content: content.map(encode_children),
                ..Default::default()
            },
        }
    }
}

impl TryFrom<RawNode> for Document {
    type Error = FormatError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        if raw.kind != DOC_TYPE {
            return Err(FormatError::ParseError(format!(
                "expected a '{DOC_TYPE}' node, found '{}'",
                raw.kind
            )));
        }
        let content = raw.content.ok_or_else(|| {
            FormatError::ParseError("document has no content array".to_string())
        })?;
        Ok(Document::new(content.into_iter().map(Node::from).collect()))
    }
}

impl From<Document> for RawNode {
    fn from(doc: Document) -> Self {
        // The root always carries its content array, even when empty.
        RawNode {
            content: Some(encode_children(doc.content)),
            ..RawNode::leaf(DOC_TYPE)
        }
    }
}

impl From<RawMark> for Mark {
    fn from(raw: RawMark) -> Self {
        match raw.kind.as_str() {
            "bold" => Mark::Bold,
            "italic" => Mark::Italic,
            "underline" => Mark::Underline,
            "strike" => Mark::Strike,
            "code" => Mark::Code,
            "highlight" => Mark::Highlight,
            "link" => match attr_string(raw.attrs.as_ref(), "href") {
                Some(href) => Mark::Link { href },
                None => Mark::Unknown {
                    kind: raw.kind.clone(),
                    attrs: raw.attrs,
                },
            },
            _ => Mark::Unknown {
                kind: raw.kind.clone(),
                attrs: raw.attrs,
            },
        }
    }
}

impl From<Mark> for RawMark {
    fn from(mark: Mark) -> Self {
        let simple = |kind: &str| RawMark {
            kind: kind.to_string(),
            attrs: None,
        };
        match mark {
            Mark::Bold => simple("bold"),
            Mark::Italic => simple("italic"),
            Mark::Underline => simple("underline"),
            Mark::Strike => simple("strike"),
            Mark::Code => simple("code"),
            Mark::Highlight => simple("highlight"),
            Mark::Link { href } => {
                let mut attrs = Map::new();
                attrs.insert("href".to_string(), Value::from(href));
                RawMark {
                    kind: "link".to_string(),
                    attrs: Some(attrs),
                }
            }
            Mark::Unknown { kind, attrs } => RawMark { kind, attrs },
        }
    }
}
