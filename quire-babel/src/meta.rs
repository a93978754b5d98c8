//! Derived post metadata: slug, excerpt, word count and reading time.

use crate::common::extract::{word_count, DEFAULT_EXCERPT_LENGTH};
use crate::detect::Content;
use crate::transforms::{content_excerpt, content_plain_text, content_reading_time};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// URL slug for a post title.
///
/// Lowercases, drops everything but ASCII word characters, whitespace and `-`, then turns each
/// whitespace run into a single `-`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept = NON_SLUG_CHARS.replace_all(&lowered, "");
    let dashed = WHITESPACE_RUN.replace_all(&kept, "-");
    dashed.trim().to_string()
}

/// Metadata stored alongside a post body.
///
/// For legacy text `word_count` counts the compiled document's text while
/// `reading_time_minutes` counts the raw body, so list markers and `#` prefixes add to the
/// reading time only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMeta {
    pub slug: String,
    pub excerpt: String,
    pub word_count: usize,
    pub reading_time_minutes: u32,
}

impl PostMeta {
    /// Derive metadata from a title and the post body.
    pub fn derive(title: &str, content: Content<'_>, excerpt_length: usize) -> Self {
        Self {
            slug: slugify(title),
            excerpt: content_excerpt(content, excerpt_length),
            word_count: word_count(&content_plain_text(content)),
            reading_time_minutes: content_reading_time(content),
        }
    }

    /// Derive metadata with the default excerpt length.
    pub fn from_content(title: &str, content: Content<'_>) -> Self {
        Self::derive(title, content, DEFAULT_EXCERPT_LENGTH)
    }
}
