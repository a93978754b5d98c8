//! Treeviz formatter for documents
//!
//! Treeviz is a visual representation of the document tree, one node per line, with box drawing
//! connectors for nesting:
//!
//! <prefix><connector> <icon> <label>
//!
//! Example:
//!
//! ⧉ Document (3 blocks)
//! ├─ § h1 Welcome
//! │ └─ ◦ Welcome
//! ├─ ☰ 2 items
//! │ ├─ • one
//! │ │ └─ ¶ one
//! │ │   └─ ◦ one
//! │ └─ • two
//! │   └─ ¶ two
//! │     └─ ◦ two
//! └─ ¶ Some closing words [bold]
//!   └─ ◦ Some closing words [bold]
//!
//! Labels are truncated to `max-label` characters (40 by default). Marks are listed after text
//! labels unless `show-marks` is `false`.

use super::icons::get_icon;
use crate::common::extract::node_text;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{Document, Node};
use std::collections::HashMap;

/// Default label truncation, in characters.
pub const DEFAULT_MAX_LABEL: usize = 40;

/// Rendering parameters for [`to_treeviz_str_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreevizOptions {
    pub show_marks: bool,
    pub max_label: usize,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        Self {
            show_marks: true,
            max_label: DEFAULT_MAX_LABEL,
        }
    }
}

impl TreevizOptions {
    /// Read `show-marks` and `max-label` from string parameters.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, FormatError> {
        Self::default().with_params(params)
    }

    /// Layer string parameters over these options.
    pub fn with_params(self, params: &HashMap<String, String>) -> Result<Self, FormatError> {
        let mut options = self;
        if let Some(raw) = params.get("show-marks") {
            options.show_marks = raw.to_lowercase() != "false";
        }
        if let Some(raw) = params.get("max-label") {
            options.max_label = raw.parse().map_err(|_| {
                FormatError::SerializationError(format!(
                    "Option 'max-label' expects a number, got '{raw}'"
                ))
            })?;
        }
        Ok(options)
    }
}

fn truncate(label: &str, max: usize) -> String {
    let single_line = label.replace('\n', "↵");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn node_label(node: &Node, options: &TreevizOptions) -> String {
    let label = match node {
        Node::Heading { level, .. } => format!("h{level} {}", node_text(node)),
        Node::BulletList { items } | Node::OrderedList { items } => {
            format!("{} items", items.len())
        }
        Node::CodeBlock { language, .. } => {
            format!("{} {}", language.as_deref().unwrap_or("code"), node_text(node))
        }
        Node::Image(image) => image.src.clone(),
        Node::HorizontalRule => "rule".to_string(),
        Node::HardBreak => "break".to_string(),
        Node::Text(text) if options.show_marks && !text.marks.is_empty() => {
            let marks: Vec<&str> = text.marks.iter().map(|mark| mark.type_name()).collect();
            format!("{} [{}]", text.text, marks.join(", "))
        }
        Node::Text(text) => text.text.clone(),
        Node::Unknown(unknown) => format!("{} (unknown)", unknown.kind),
        _ => node_text(node),
    };
    truncate(&label, options.max_label)
}

/// Format a single node and its subtree
fn format_node(
    node: &Node,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    options: &TreevizOptions,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(node.type_name());

    let mut output = format!("{prefix}{connector} {icon} {}\n", node_label(node, options));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    output.push_str(&format_children(node.children(), &child_prefix, options));
    output
}

fn format_children(children: &[Node], prefix: &str, options: &TreevizOptions) -> String {
    let child_count = children.len();
    children
        .iter()
        .enumerate()
        .map(|(i, child)| format_node(child, prefix, i, child_count, options))
        .collect()
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_options(doc, &TreevizOptions::default())
}

/// Convert a document to a treeviz string
pub fn to_treeviz_str_with_options(doc: &Document, options: &TreevizOptions) -> String {
    let icon = get_icon(crate::ir::DOC_TYPE);
    let header = format!("{icon} Document ({} blocks)\n", doc.content.len());
    header + &format_children(&doc.content, "", options)
}

/// Format implementation for treeviz format
#[derive(Default)]
pub struct TreevizFormat {
    options: TreevizOptions,
}

impl TreevizFormat {
    pub fn new(options: TreevizOptions) -> Self {
        Self { options }
    }
}

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_options(doc, &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = self.options.with_params(options)?;
        Ok(to_treeviz_str_with_options(doc, &options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{ListKind, Mark};

    #[test]
    fn test_tree_shape() {
        let doc = Document::new(vec![
            Node::heading(1, "Welcome"),
            Node::list(ListKind::Bullet, &["one"]),
        ]);
        let expected = [
            "⧉ Document (2 blocks)",
            "├─ § h1 Welcome",
            "│ └─ ◦ Welcome",
            "└─ ☰ 1 items",
            "  └─ • one",
            "    └─ ¶ one",
            "      └─ ◦ one",
        ];
        assert_eq!(to_treeviz_str(&doc), format!("{}\n", expected.join("\n")));
    }

    #[test]
    fn test_marks_can_be_hidden() {
        let doc = Document::new(vec![Node::Paragraph {
            content: vec![Node::marked_text("hi", vec![Mark::Bold, Mark::Code])],
        }]);
        assert!(to_treeviz_str(&doc).contains("◦ hi [bold, code]"));

        let mut params = HashMap::new();
        params.insert("show-marks".to_string(), "false".to_string());
        let options = TreevizOptions::from_params(&params).unwrap();
        let output = to_treeviz_str_with_options(&doc, &options);
        assert!(output.contains("◦ hi\n"));
    }

    #[test]
    fn test_labels_are_truncated() {
        let doc = Document::new(vec![Node::paragraph(&"x".repeat(60))]);
        let options = TreevizOptions {
            show_marks: true,
            max_label: 10,
        };
        let output = to_treeviz_str_with_options(&doc, &options);
        assert!(output.contains(&format!("¶ {}…\n", "x".repeat(9))));
    }

    #[test]
    fn test_params_layer_over_format_options() {
        let format = TreevizFormat::new(TreevizOptions {
            show_marks: false,
            max_label: 5,
        });
        let doc = Document::new(vec![Node::paragraph("abcdefgh")]);
        assert!(format.serialize(&doc).unwrap().contains("¶ abcd…\n"));

        let mut params = HashMap::new();
        params.insert("max-label".to_string(), "20".to_string());
        let output = format.serialize_with_options(&doc, &params).unwrap();
        assert!(output.contains("¶ abcdefgh\n"));
    }

    #[test]
    fn test_bad_max_label() {
        let mut params = HashMap::new();
        params.insert("max-label".to_string(), "wide".to_string());
        assert!(TreevizOptions::from_params(&params).is_err());
    }
}
