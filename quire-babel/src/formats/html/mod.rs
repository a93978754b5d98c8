//! HTML format implementation
//!
//! Export only: documents are rendered to semantic HTML5. Parsing HTML back into a document is
//! not supported.
//!
//! # Library Choice
//!
//! Output is built as a `markup5ever_rcdom` tree and written by the `html5ever` serializer, so
//! escaping of text and attribute values is never done by hand.
//!
//! # Element Mapping Table
//!
//! | Node            | HTML                                                                 |
//! |-----------------|----------------------------------------------------------------------|
//! | Document        | `<div class="block-renderer {class}">`                               |
//! | Paragraph       | `<p class="post-paragraph">`                                         |
//! | Heading         | `<hN class="post-heading post-heading-N">`, N in 1..=3, otherwise 2  |
//! | Blockquote      | `<blockquote class="post-blockquote">`                               |
//! | BulletList      | `<ul class="post-list">` with one `<li>` per item                    |
//! | OrderedList     | `<ol class="post-list">` with one `<li>` per item                    |
//! | CodeBlock       | `<pre class="post-code-block" data-language="..."><code>`            |
//! | Image           | `<figure class="post-image"><img>` plus `<figcaption>` when alt text |
//! | HorizontalRule  | `<hr class="post-rule">`                                             |
//! | HardBreak       | `<br>`                                                               |
//! | Unknown         | its content, without a wrapper; nothing when it has no content       |
//!
//! | Mark      | HTML                                                                      |
//! |-----------|---------------------------------------------------------------------------|
//! | bold      | `<strong>`                                                                |
//! | italic    | `<em>`                                                                    |
//! | underline | `<u>`                                                                     |
//! | strike    | `<s>`                                                                     |
//! | code      | `<code class="post-inline-code">`                                         |
//! | link      | `<a href target="_blank" rel="noopener noreferrer" class="post-link">`    |
//! | highlight | `<mark class="post-highlight">`                                           |
//!
//! Marks nest in the order they are listed on the text node, the first one innermost.
//! Unknown marks are skipped.
//!
//! # Output Format
//!
//! By default the output is the fragment alone. With `standalone` it is wrapped in a complete
//! HTML5 page embedding `css/baseline.css` and any custom CSS.

mod serializer;

pub use serializer::{
    render_html, serialize_to_html, HtmlOptions, BASELINE_CSS, ROOT_CLASS,
};

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// The stylesheet embedded in standalone pages.
pub fn get_default_css() -> &'static str {
    BASELINE_CSS
}

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Apply string options on top of this format's defaults.
    ///
    /// Recognized keys: `class`, `standalone`, `title`, `css` (stylesheet text).
    pub fn options_from_params(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<HtmlOptions, FormatError> {
        let mut options = self.options.clone();
        for (key, value) in params {
            match key.as_str() {
                "class" => options.class_name = value.clone(),
                "standalone" => options.standalone = parse_bool(key, value)?,
                "title" => options.title = value.clone(),
                "css" => options.custom_css = Some(value.clone()),
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'html' does not support option '{other}'"
                    )))
                }
            }
        }
        Ok(options)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, FormatError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(FormatError::SerializationError(format!(
            "Option '{key}' expects a boolean, got '{value}'"
        ))),
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 fragment or standalone page with embedded CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_html(doc, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = self.options_from_params(options)?;
        serialize_to_html(doc, &options)
    }
}
