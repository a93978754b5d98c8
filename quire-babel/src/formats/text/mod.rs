//! Plain text format
//!
//! Parsing runs content detection, so a `.txt` file that holds a serialized document is decoded
//! rather than compiled line by line. Serializing extracts the document's plain text, which is
//! lossy: marks, images and code block languages do not survive.

use crate::common::compile::compile;
use crate::common::extract::plain_text;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for legacy plain-text posts
pub struct TextFormat;

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Legacy plain-text posts (headings, lists and quotes inferred per line)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(compile(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(plain_text(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::Node;

    #[test]
    fn test_parse_compiles_lines() {
        let doc = TextFormat.parse("# Title\n\nBody").unwrap();
        assert_eq!(
            doc.content,
            vec![Node::heading(1, "Title"), Node::paragraph("Body")]
        );
    }

    #[test]
    fn test_serialize_is_plain_text() {
        let doc = Document::new(vec![Node::paragraph("one"), Node::paragraph("two")]);
        assert_eq!(TextFormat.serialize(&doc).unwrap(), "one\n\ntwo");
    }
}
