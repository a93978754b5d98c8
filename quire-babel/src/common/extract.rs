//! Plain-text extraction, excerpts and reading time.
//!
//! Extraction ignores marks. Each top-level block contributes its flattened text followed by a
//! blank-line separator:
//!
//! - headings and paragraphs: the text
//! - blockquotes: the text prefixed with `"> "`
//! - lists: one line per entry, `"- "` for bullets and `"N. "` (from 1) for ordered lists
//! - code blocks: the text fenced with triple backticks
//! - horizontal rules: `---`
//!
//! Any other block contributes its flattened text with no separator. The joined result is
//! trimmed.

use crate::ir::nodes::{Document, Node};

/// Excerpt length used when the caller does not pick one.
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

/// Reading speed used for the reading time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

const BLOCK_SEPARATOR: &str = "\n\n";
const ELLIPSIS: &str = "...";

/// Concatenated text of every text node below `node`.
pub fn node_text(node: &Node) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.text),
        _ => node
            .children()
            .iter()
            .for_each(|child| collect_text(child, out)),
    }
}

fn block_text(block: &Node) -> String {
    match block {
        Node::Heading { .. } | Node::Paragraph { .. } => {
            format!("{}{BLOCK_SEPARATOR}", node_text(block))
        }
        Node::Blockquote { .. } => format!("> {}{BLOCK_SEPARATOR}", node_text(block)),
        Node::BulletList { items } => {
            let lines: Vec<String> = items
                .iter()
                .map(|item| format!("- {}", node_text(item)))
                .collect();
            format!("{}{BLOCK_SEPARATOR}", lines.join("\n"))
        }
        Node::OrderedList { items } => {
            let lines: Vec<String> = items
                .iter()
                .enumerate()
                .map(|(index, item)| format!("{}. {}", index + 1, node_text(item)))
                .collect();
            format!("{}{BLOCK_SEPARATOR}", lines.join("\n"))
        }
        Node::CodeBlock { .. } => format!("```\n{}\n```{BLOCK_SEPARATOR}", node_text(block)),
        Node::HorizontalRule => format!("---{BLOCK_SEPARATOR}"),
        other => node_text(other),
    }
}

/// Flatten a document to plain text.
pub fn plain_text(doc: &Document) -> String {
    let joined: String = doc.content.iter().map(block_text).collect();
    joined.trim().to_string()
}

/// Truncate plain text to at most `max_chars` characters, appending `...` when cut.
pub fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", text[..cut].trim_end()),
    }
}

/// Excerpt of the document's plain text.
pub fn excerpt(doc: &Document, max_chars: usize) -> String {
    truncate_excerpt(&plain_text(doc), max_chars)
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `words` words, never less than one.
pub fn minutes_for_words(words: usize) -> u32 {
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Estimated reading time of a document in minutes.
pub fn reading_time(doc: &Document) -> u32 {
    minutes_for_words(word_count(&plain_text(doc)))
}
