//! Format implementations
//!
//! Each format converts between the document model and one external representation. Formats
//! that only make sense as output (HTML, treeviz) support serialization alone.

pub mod html;
pub mod icons;
pub mod json;
pub mod text;
pub mod treeviz;

pub use html::{get_default_css, HtmlFormat, HtmlOptions};
pub use json::JsonFormat;
pub use text::TextFormat;
pub use treeviz::TreevizFormat;
