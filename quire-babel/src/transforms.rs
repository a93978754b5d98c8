//! Content-level pipelines
//!
//! These functions take post content as it comes out of storage ([`Content`]) and run the whole
//! detect → compile → render / extract chain. They are total: empty content renders nothing and
//! reads in one minute.

use crate::common::compile::compile_content;
use crate::common::extract::{
    minutes_for_words, plain_text, reading_time, truncate_excerpt, word_count,
};
use crate::detect::{detect, Content, Detected};
use crate::error::FormatError;
use crate::formats::html::{render_html, HtmlOptions};

/// Render stored content to HTML. Empty content renders the empty string.
///
/// # Example
///
/// ```
/// use quire_babel::{render_content, Content, HtmlOptions};
///
/// let html = render_content(Content::Text("Hello"), &HtmlOptions::default());
/// assert_eq!(html, r#"<div class="block-renderer"><p class="post-paragraph">Hello</p></div>"#);
/// ```
pub fn render_content(content: Content<'_>, options: &HtmlOptions) -> String {
    match detect(content) {
        Detected::Empty => String::new(),
        Detected::Structured(doc) => render_html(&doc, options),
        Detected::PlainText(text) => render_html(&compile_content(Content::Text(text)), options),
    }
}

/// Plain text of stored content, compiling legacy text first.
pub fn content_plain_text(content: Content<'_>) -> String {
    match detect(content) {
        Detected::Empty => String::new(),
        Detected::Structured(doc) => plain_text(&doc),
        Detected::PlainText(text) => plain_text(&compile_content(Content::Text(text))),
    }
}

/// Excerpt of stored content, at most `max_chars` characters before the ellipsis.
pub fn content_excerpt(content: Content<'_>, max_chars: usize) -> String {
    truncate_excerpt(&content_plain_text(content), max_chars)
}

/// Reading time of stored content in minutes.
///
/// Legacy plain text is counted as written, without compiling it first.
pub fn content_reading_time(content: Content<'_>) -> u32 {
    match detect(content) {
        Detected::Empty => 1,
        Detected::Structured(doc) => reading_time(&doc),
        Detected::PlainText(text) => minutes_for_words(word_count(text)),
    }
}

/// Migrate stored content to its serialized structured form.
///
/// Structured content is re-encoded as is; legacy text is compiled first.
pub fn migrate_content(content: Content<'_>) -> Result<String, FormatError> {
    let doc = compile_content(content);
    serde_json::to_string(&doc).map_err(|e| FormatError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::is_structured;
    use serde_json::json;

    #[test]
    fn empty_content_renders_nothing() {
        assert_eq!(render_content(Content::Text(""), &HtmlOptions::default()), "");
        assert_eq!(
            render_content(Content::Json(&serde_json::Value::Null), &HtmlOptions::default()),
            ""
        );
    }

    #[test]
    fn structured_values_render_directly() {
        let value = json!({
            "type": "doc",
            "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Hi"}]}]
        });
        assert_eq!(
            render_content(Content::Json(&value), &HtmlOptions::default()),
            r#"<div class="block-renderer"><p class="post-paragraph">Hi</p></div>"#
        );
    }

    #[test]
    fn reading_time_of_legacy_text_counts_raw_words() {
        // The list markers count as words when the raw text is read.
        let text = ["- a"; 101].join("\n");
        assert_eq!(content_reading_time(Content::Text(&text)), 2);
        assert_eq!(content_reading_time(Content::Text("")), 1);
    }

    #[test]
    fn excerpt_of_legacy_text_uses_compiled_text() {
        let excerpt = content_excerpt(Content::Text("# Title\nBody text"), 6);
        assert_eq!(excerpt, "Title...");
    }

    #[test]
    fn migrated_content_is_structured() {
        let migrated = migrate_content(Content::Text("Just a line")).unwrap();
        assert!(is_structured(Content::Text(&migrated)));
        assert_eq!(
            migrated,
            r#"{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"Just a line"}]}]}"#
        );
    }
}
