//! CLI-specific transforms
//!
//! This module defines the inspection views available through `quire inspect`.
//! Each transform picks a pipeline stage and a way to print it.
//!
//! ## Transform Pipeline
//!
//! A post body goes through these stages:
//!
//! 1. **Classification** - each line of legacy plain text on its own
//!    - `line-classes`: one JSON object per line
//!
//! 2. **Compilation** - detected content → Document
//!    - `doc-json`: the editor JSON for the document
//!    - `doc-treeviz`: tree visualization with Unicode icons
//!
//! 3. **Extraction** - Document → plain text and derived numbers
//!    - `plain-text`: flattened text
//!    - `stats`: word count, reading time, block count and excerpt
//!
//! ## Extra Parameters
//!
//! Transforms can accept extra parameters via `--extra-<name> [value]`:
//!
//! - `show-marks`, `max-label`: forwarded to `doc-treeviz`
//! - `excerpt-length`: excerpt size used by `stats`
//!
//! Example: `quire inspect post.txt doc-treeviz --extra-max-label 20`

use quire_babel::common::classify::classify_line;
use quire_babel::common::extract::DEFAULT_EXCERPT_LENGTH;
use quire_babel::formats::treeviz::{to_treeviz_str_with_options, TreevizOptions};
use quire_babel::{
    compile_content, content_excerpt, content_plain_text, content_reading_time, word_count,
    Content,
};
use serde_json::json;
use std::collections::HashMap;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &[
    "doc-json",
    "doc-treeviz",
    "line-classes",
    "plain-text",
    "stats",
];

/// Execute a named transform on a post body with optional extra parameters
///
/// # Arguments
///
/// * `source` - The stored post body, plain text or serialized document
/// * `transform_name` - The transform to apply (e.g., "doc-treeviz", "stats")
/// * `extra_params` - Optional parameters for the transform
///
/// # Returns
///
/// The transformed output as a string, or an error message
///
/// # Examples
///
/// ```ignore
/// let params = HashMap::new();
/// let output = execute_transform("# Title\n\nBody", "doc-treeviz", &params)?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let content = Content::Text(source);

    match transform_name {
        "doc-json" => {
            let doc = compile_content(content);
            serde_json::to_string_pretty(&doc)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "doc-treeviz" => {
            let options = TreevizOptions::from_params(extra_params)
                .map_err(|e| format!("Transform failed: {e}"))?;
            Ok(to_treeviz_str_with_options(
                &compile_content(content),
                &options,
            ))
        }
        "line-classes" => {
            let classes: Vec<_> = source.split('\n').map(classify_line).collect();
            serde_json::to_string_pretty(&classes)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "plain-text" => Ok(content_plain_text(content)),
        "stats" => {
            let excerpt_length = match extra_params.get("excerpt-length") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| format!("excerpt-length expects a number, got '{raw}'"))?,
                None => DEFAULT_EXCERPT_LENGTH,
            };
            Ok(stats_json(content, excerpt_length).to_string())
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

/// Same numbers as `PostMeta`: words from the document, reading time from the raw body.
fn stats_json(content: Content<'_>, excerpt_length: usize) -> serde_json::Value {
    let doc = compile_content(content);
    json!({
        "blocks": doc.content.len(),
        "words": word_count(&content_plain_text(content)),
        "reading_time_minutes": content_reading_time(content),
        "excerpt": content_excerpt(content, excerpt_length),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_classes_emit_one_entry_per_line() {
        let source = "# Title\n- item\n\nplain";
        let output = execute_transform(source, "line-classes", &HashMap::new())
            .expect("transform to run");

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let classes: Vec<&str> = parsed
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["class"].as_str().unwrap())
            .collect();
        assert_eq!(classes, vec!["heading", "listitem", "blank", "paragraph"]);
    }

    #[test]
    fn doc_json_is_editor_json() {
        let output =
            execute_transform("Hello", "doc-json", &HashMap::new()).expect("transform to run");

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["type"], "doc");
        assert_eq!(parsed["content"][0]["type"], "paragraph");
    }

    #[test]
    fn doc_treeviz_accepts_extra_params() {
        let mut extra_params = HashMap::new();
        extra_params.insert("max-label".to_string(), "4".to_string());

        let output = execute_transform("A fairly long paragraph", "doc-treeviz", &extra_params)
            .expect("transform to run");
        assert!(output.contains("A f…"));
    }

    #[test]
    fn doc_treeviz_rejects_bad_numbers() {
        let mut extra_params = HashMap::new();
        extra_params.insert("max-label".to_string(), "many".to_string());

        let result = execute_transform("Hello", "doc-treeviz", &extra_params);
        assert!(result.unwrap_err().contains("max-label"));
    }

    #[test]
    fn plain_text_of_structured_content() {
        let source = r#"{"type":"doc","content":[{"type":"heading","attrs":{"level":1},"content":[{"type":"text","text":"Hi"}]},{"type":"paragraph","content":[{"type":"text","text":"there"}]}]}"#;
        let output =
            execute_transform(source, "plain-text", &HashMap::new()).expect("transform to run");
        assert_eq!(output, "Hi\n\nthere");
    }

    #[test]
    fn stats_report_counts() {
        let mut extra_params = HashMap::new();
        extra_params.insert("excerpt-length".to_string(), "5".to_string());

        let output = execute_transform("# Intro\n\nsome body words", "stats", &extra_params)
            .expect("transform to run");
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["blocks"], 2);
        assert_eq!(parsed["reading_time_minutes"], 1);
        assert_eq!(parsed["excerpt"], "Intro...");
    }

    #[test]
    fn unknown_transform_is_an_error() {
        let result = execute_transform("x", "ast-tag", &HashMap::new());
        assert_eq!(result.unwrap_err(), "Unknown transform: ast-tag");
    }
}
