//! Format-agnostic document logic: line classification, plain-text compilation and text
//! extraction.

pub mod classify;
pub mod compile;
pub mod extract;
