//! Structured document JSON format
//!
//! The editor's own serialization: `{"type": "doc", "content": [...]}`. Parsing is strict about
//! the document shape (a source that is not a document is an error, not plain text) and lenient
//! about the nodes inside it.

use crate::detect::parse_document;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for serialized structured documents
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Structured document JSON as stored by the editor"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parse_document(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::Node;

    #[test]
    fn test_parse_rejects_plain_text() {
        assert!(matches!(
            JsonFormat.parse("just words"),
            Err(FormatError::ParseError(_))
        ));
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let doc = Document::new(vec![Node::HorizontalRule, Node::paragraph("")]);
        let json = JsonFormat.serialize(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "doc",
                "content": [{"type": "horizontalRule"}, {"type": "paragraph"}]
            })
        );
    }
}
