//! Format detection for stored post content
//!
//! Post bodies arrive either as legacy plain text or as a serialized (or already parsed)
//! structured document. Detection is an attempted decode: content that decodes into the
//! [`Document`] shape is structured, anything else that is a non-empty string is plain text.
//! Decode failures are never surfaced; they select the plain-text path.

use crate::error::FormatError;
use crate::ir::nodes::Document;
use crate::ir::DOC_TYPE;
use serde_json::Value;

/// A post body as handed over by the storage read path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Content<'a> {
    /// A string column: legacy plain text or serialized JSON.
    Text(&'a str),
    /// An already parsed JSON value (e.g. a `jsonb` column).
    Json(&'a Value),
}

impl<'a> From<&'a str> for Content<'a> {
    fn from(text: &'a str) -> Self {
        Content::Text(text)
    }
}

impl<'a> From<&'a String> for Content<'a> {
    fn from(text: &'a String) -> Self {
        Content::Text(text.as_str())
    }
}

impl<'a> From<&'a Value> for Content<'a> {
    fn from(value: &'a Value) -> Self {
        Content::Json(value)
    }
}

/// Outcome of [`detect`].
#[derive(Debug, Clone, PartialEq)]
pub enum Detected<'a> {
    /// Nothing to render.
    Empty,
    /// The content decoded into a structured document.
    Structured(Document),
    /// Legacy plain text that still needs compiling.
    PlainText(&'a str),
}

/// True if the value has the document shape: a `"doc"` type tag and a `content` array.
pub fn is_document_shape(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some(DOC_TYPE)
        && value.get("content").is_some_and(Value::is_array)
}

/// True if the content is a structured document (serialized or parsed).
pub fn is_structured(content: Content<'_>) -> bool {
    match content {
        Content::Text(text) => text_is_structured(text),
        Content::Json(Value::String(text)) => text_is_structured(text),
        Content::Json(value) => is_document_shape(value),
    }
}

fn text_is_structured(text: &str) -> bool {
    serde_json::from_str::<Value>(text).is_ok_and(|value| is_document_shape(&value))
}

/// Classify content as empty, structured or plain text.
pub fn detect<'a>(content: Content<'a>) -> Detected<'a> {
    match content {
        Content::Text(text) => detect_text(text),
        Content::Json(Value::String(text)) => detect_text(text),
        Content::Json(value) if is_document_shape(value) => {
            match decode_document(value.clone()) {
                Ok(doc) => Detected::Structured(doc),
                Err(err) => {
                    tracing::debug!(%err, "structured value failed to decode, treating as empty");
                    Detected::Empty
                }
            }
        }
        Content::Json(_) => Detected::Empty,
    }
}

fn detect_text(text: &str) -> Detected<'_> {
    if text.is_empty() {
        return Detected::Empty;
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value) if is_document_shape(&value) => match decode_document(value) {
            Ok(doc) => Detected::Structured(doc),
            Err(err) => {
                tracing::debug!(%err, "structured content failed to decode, compiling as plain text");
                Detected::PlainText(text)
            }
        },
        _ => Detected::PlainText(text),
    }
}

/// Strictly decode serialized structured content.
///
/// Unlike [`detect`], this reports why the source is not a document.
pub fn parse_document(source: &str) -> Result<Document, FormatError> {
    let value: Value = serde_json::from_str(source)
        .map_err(|e| FormatError::ParseError(format!("invalid JSON: {e}")))?;
    decode_document(value)
}

/// Decode a parsed JSON value that must have the document shape.
pub fn decode_document(value: Value) -> Result<Document, FormatError> {
    if !is_document_shape(&value) {
        return Err(FormatError::ParseError(format!(
            "not a structured document: expected type \"{DOC_TYPE}\" with a content array"
        )));
    }
    serde_json::from_value(value).map_err(|e| FormatError::ParseError(e.to_string()))
}
