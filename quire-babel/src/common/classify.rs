//! Heuristic line classifier for legacy plain-text posts.
//!
//! Each line is classified on its own, with no state carried between calls. Priority order is
//! heading, then list item, then blockquote; anything else is a paragraph line.
//!
//! The all-caps rule (a short line made only of `A-Z`, digits and whitespace is a level 2
//! heading) also fires on shouted one-liners such as `"WOW"` or on a bare number like `"2024"`.
//! It is kept as is: previously migrated posts were compiled with it, and changing it would
//! change how their text round-trips.

use crate::ir::nodes::ListKind;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Lines at or above this many characters are never all-caps headings.
pub const CAPS_HEADING_MAX_CHARS: usize = 80;

static CAPS_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z\s0-9]+$").unwrap());
static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*•]\s+").unwrap());
static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.\s+").unwrap());

/// Byte-order mark. Files saved by some editors start with one.
const BOM: char = '\u{FEFF}';

/// Trim whitespace and byte-order marks from both ends of a line.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingLine {
    pub level: u8,
    pub text: String,
}

/// A detected list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItemLine {
    pub kind: ListKind,
    pub text: String,
}

/// Classification of a single line of legacy text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "class", rename_all = "lowercase")]
pub enum LineClass {
    Blank,
    Heading(HeadingLine),
    ListItem(ListItemLine),
    Blockquote { text: String },
    Paragraph { text: String },
}

/// Detect a heading: markdown-style `#` prefixes first, then the all-caps heuristic.
pub fn detect_heading(line: &str) -> Option<HeadingLine> {
    let trimmed = trim_line(line);

    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(text) = trimmed.strip_prefix(prefix) {
            return Some(HeadingLine {
                level,
                text: text.to_string(),
            });
        }
    }

    let is_caps = trimmed.chars().count() < CAPS_HEADING_MAX_CHARS
        && trimmed == trimmed.to_uppercase()
        && CAPS_HEADING.is_match(trimmed);
    is_caps.then(|| HeadingLine {
        level: 2,
        text: trimmed.to_string(),
    })
}

/// Detect a bullet (`-`, `*`, `•`) or ordered (`1.`) list item.
pub fn detect_list_item(line: &str) -> Option<ListItemLine> {
    let trimmed = trim_line(line);

    [(&*BULLET_MARKER, ListKind::Bullet), (&*ORDERED_MARKER, ListKind::Ordered)]
        .into_iter()
        .find_map(|(marker, kind)| {
            marker.find(trimmed).map(|found| ListItemLine {
                kind,
                text: trimmed[found.end()..].to_string(),
            })
        })
}

/// Detect a `> ` quote or a line wrapped in double quotes. Returns the quoted text.
///
/// An empty quotation (`""`, or a lone `"`) is not a blockquote.
pub fn detect_blockquote(line: &str) -> Option<String> {
    let trimmed = trim_line(line);

    let quoted = if let Some(text) = trimmed.strip_prefix("> ") {
        Some(text)
    } else if trimmed.starts_with('"') && trimmed.ends_with('"') {
        Some(trimmed.get(1..trimmed.len() - 1).unwrap_or(""))
    } else {
        None
    };

    quoted
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Classify one line. Blank lines are recognised before any detector runs.
pub fn classify_line(line: &str) -> LineClass {
    let trimmed = trim_line(line);
    if trimmed.is_empty() {
        return LineClass::Blank;
    }

    if let Some(heading) = detect_heading(line) {
        return LineClass::Heading(heading);
    }
    if let Some(item) = detect_list_item(line) {
        return LineClass::ListItem(item);
    }
    if let Some(text) = detect_blockquote(line) {
        return LineClass::Blockquote { text };
    }

    LineClass::Paragraph {
        text: trimmed.to_string(),
    }
}
