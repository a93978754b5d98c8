//! HTML serialization (Document → HTML)
//!
//! Pipeline: Document → RcDom (HTML DOM tree) → HTML string, optionally wrapped in a complete
//! page. Text and attribute values are escaped by the html5ever serializer.

use crate::error::FormatError;
use crate::ir::nodes::{Document, Image, Mark, Node, Text, DEFAULT_HEADING_LEVEL};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node as DomNode, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Class carried by the root wrapper of every rendered document.
pub const ROOT_CLASS: &str = "block-renderer";

/// The embedded baseline stylesheet used for standalone pages.
pub const BASELINE_CSS: &str = include_str!("../../../css/baseline.css");

const DEFAULT_TITLE: &str = "Untitled";

/// Options for HTML serialization
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    /// Extra class added to the root wrapper next to `block-renderer`
    pub class_name: String,
    /// Wrap the fragment in a complete HTML5 page
    pub standalone: bool,
    /// Page title, only used for standalone output
    pub title: String,
    /// CSS appended after the baseline stylesheet, only used for standalone output
    pub custom_css: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            standalone: false,
            title: DEFAULT_TITLE.to_string(),
            custom_css: None,
        }
    }
}

impl HtmlOptions {
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn standalone(mut self, title: impl Into<String>) -> Self {
        self.standalone = true;
        self.title = title.into();
        self
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }

    fn root_class(&self) -> String {
        let extra = self.class_name.trim();
        if extra.is_empty() {
            ROOT_CLASS.to_string()
        } else {
            format!("{ROOT_CLASS} {extra}")
        }
    }
}

/// Serialize a document to HTML.
pub fn serialize_to_html(doc: &Document, options: &HtmlOptions) -> Result<String, FormatError> {
    let dom = build_html_dom(doc, options);
    let fragment = serialize_dom(&dom)?;

    if options.standalone {
        Ok(wrap_in_document(&fragment, options))
    } else {
        Ok(fragment)
    }
}

/// Render a document to HTML, never failing.
///
/// A serialization failure is logged and yields an empty string.
pub fn render_html(doc: &Document, options: &HtmlOptions) -> String {
    serialize_to_html(doc, options).unwrap_or_else(|err| {
        tracing::warn!(%err, "HTML serialization failed, rendering nothing");
        String::new()
    })
}

/// Build an HTML DOM tree for the document
fn build_html_dom(doc: &Document, options: &HtmlOptions) -> RcDom {
    let dom = RcDom::default();
    let class = options.root_class();
    let root = create_element("div", vec![("class", class.as_str())]);

    for block in &doc.content {
        match block {
            Node::Text(_) => tracing::debug!("skipping text node at block level"),
            block => append_node(&root, block),
        }
    }

    dom.document.children.borrow_mut().push(root);
    dom
}

/// Pre-order, depth-first rendering of one node into `parent`.
fn append_node(parent: &Handle, node: &Node) {
    match node {
        Node::Paragraph { content } => {
            let p = append_element(parent, "p", vec![("class", "post-paragraph")]);
            append_children(&p, content);
        }

        Node::Heading { level, content } => {
            let level = match *level {
                level @ 1..=3 => level,
                _ => DEFAULT_HEADING_LEVEL,
            };
            let tag = format!("h{level}");
            let class = format!("post-heading post-heading-{level}");
            let heading = append_element(parent, &tag, vec![("class", class.as_str())]);
            append_children(&heading, content);
        }

        Node::Blockquote { content } => {
            let quote = append_element(parent, "blockquote", vec![("class", "post-blockquote")]);
            append_children(&quote, content);
        }

        Node::BulletList { items } | Node::OrderedList { items } => {
            let tag = if matches!(node, Node::OrderedList { .. }) {
                "ol"
            } else {
                "ul"
            };
            let list = append_element(parent, tag, vec![("class", "post-list")]);
            // Each entry contributes only its children, whatever its kind.
            for item in items {
                let li = append_element(&list, "li", vec![]);
                append_children(&li, item.children());
            }
        }

        // Outside a list container an item has no wrapper of its own.
        Node::ListItem { content } => append_children(parent, content),

        Node::CodeBlock { language, content } => {
            let mut attrs = vec![("class", "post-code-block")];
            if let Some(lang) = language {
                attrs.push(("data-language", lang.as_str()));
            }
            let pre = append_element(parent, "pre", attrs);
            let code = append_element(&pre, "code", vec![]);
            let source: String = content.iter().map(raw_text).collect();
            code.children.borrow_mut().push(create_text(&source));
        }

        Node::Image(image) => append_image(parent, image),

        Node::HorizontalRule => {
            append_element(parent, "hr", vec![("class", "post-rule")]);
        }

        Node::HardBreak => {
            append_element(parent, "br", vec![]);
        }

        Node::Text(text) => append_text(parent, text),

        Node::Unknown(unknown) => match &unknown.content {
            Some(content) => append_children(parent, content),
            None => tracing::debug!(kind = %unknown.kind, "skipping unknown node"),
        },
    }
}

fn append_children(parent: &Handle, children: &[Node]) {
    for child in children {
        append_node(parent, child);
    }
}

/// Text of a code block child; marks are ignored.
fn raw_text(node: &Node) -> String {
    match node {
        Node::Text(text) => text.text.clone(),
        other => other.children().iter().map(raw_text).collect(),
    }
}

fn append_image(parent: &Handle, image: &Image) {
    let figure = append_element(parent, "figure", vec![("class", "post-image")]);

    let alt = image.alt.as_deref().unwrap_or("");
    let mut attrs = vec![("src", image.src.as_str()), ("alt", alt)];
    if let Some(title) = &image.title {
        attrs.push(("title", title.as_str()));
    }
    append_element(&figure, "img", attrs);

    if !alt.is_empty() {
        let caption = append_element(&figure, "figcaption", vec![]);
        caption.children.borrow_mut().push(create_text(alt));
    }
}

/// Wrap a text run in its marks. The first mark is the innermost wrapper.
fn append_text(parent: &Handle, text: &Text) {
    let wrapped = text
        .marks
        .iter()
        .fold(create_text(&text.text), |inner, mark| match mark_element(mark) {
            Some(outer) => {
                outer.children.borrow_mut().push(inner);
                outer
            }
            None => inner,
        });
    parent.children.borrow_mut().push(wrapped);
}

/// Element a mark wraps its text in; unknown marks have none.
fn mark_element(mark: &Mark) -> Option<Handle> {
    let element = match mark {
        Mark::Bold => create_element("strong", vec![]),
        Mark::Italic => create_element("em", vec![]),
        Mark::Underline => create_element("u", vec![]),
        Mark::Strike => create_element("s", vec![]),
        Mark::Code => create_element("code", vec![("class", "post-inline-code")]),
        Mark::Link { href } => create_element(
            "a",
            vec![
                ("href", href.as_str()),
                ("target", "_blank"),
                ("rel", "noopener noreferrer"),
                ("class", "post-link"),
            ],
        ),
        Mark::Highlight => create_element("mark", vec![("class", "post-highlight")]),
        Mark::Unknown { .. } => return None,
    };
    Some(element)
}

fn append_element(parent: &Handle, tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let element = create_element(tag, attrs);
    parent.children.borrow_mut().push(element.clone());
    element
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the root wrapper and everything below it
fn serialize_dom(dom: &RcDom) -> Result<String, FormatError> {
    let mut output = Vec::new();

    let root = dom
        .document
        .children
        .borrow()
        .first()
        .ok_or_else(|| FormatError::SerializationError("Empty document".to_string()))?
        .clone();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(root);
    serialize(&mut output, &serializable, opts)
        .map_err(|e| FormatError::SerializationError(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Wrap the fragment in a complete HTML document with embedded CSS
fn wrap_in_document(body_html: &str, options: &HtmlOptions) -> String {
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let escaped_title = html_escape(&options.title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="quire-babel">
  <title>{escaped_title}</title>
  <style>
{BASELINE_CSS}
{custom_css}
  </style>
</head>
<body>
{body_html}
</body>
</html>
"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
