//! Error types for format operations
//!
//! Only the fallible boundaries (registry lookups, strict decoding, serialization) return these.
//! Detection, compilation, rendering and extraction are total and never produce a `FormatError`.

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
