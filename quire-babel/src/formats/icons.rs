//! Icon mapping for tree visualization
//!
//! Icons are keyed by the wire type name of a node (`"paragraph"`, `"bulletList"`, ...).

/// Get the Unicode icon for a given node type
///
/// Returns a single Unicode character that visually represents the node type. Node types this
/// model does not know share the fallback icon.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "doc" => "⧉",
        "heading" => "§",
        "paragraph" => "¶",
        "blockquote" => "❝",
        "bulletList" | "orderedList" => "☰",
        "listItem" => "•",
        "codeBlock" => "𝒱",
        "image" => "▣",
        "horizontalRule" => "⎯",
        "hardBreak" => "↵",
        "text" => "◦",
        _ => "○",
    }
}
