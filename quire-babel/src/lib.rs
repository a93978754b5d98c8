//! Block document model and conversion pipeline for quire posts
//!
//!     Posts are stored either as legacy plain text or as a structured document tree (the
//!     Tiptap/ProseMirror JSON the editor produces). This crate turns either form into the same
//!     typed tree and derives everything the blog shows from it: rendered HTML, plain text,
//!     excerpts and reading time.
//!
//!     This is a pure lib, that is, it powers quire-cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it std print, env vars etc. The only side channel
//!     is `tracing` events, which are silent unless the host installs a subscriber.
//!
//! Architecture
//!
//!     Data flows one way:
//!
//!         stored content → detect → [compile if plain text] → Document → render | extract
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError
//!     ├── detect.rs               # Content, Detected, is_structured
//!     ├── ir
//!     │   ├── nodes.rs            # Document, Node, Mark
//!     │   └── raw.rs              # lenient wire shape
//!     ├── common
//!     │   ├── classify.rs         # per-line heuristics
//!     │   ├── compile.rs          # plain text → Document
//!     │   └── extract.rs          # Document → plain text, excerpt, reading time
//!     ├── formats
//!     │   ├── html                # Document → HTML (html5ever DOM)
//!     │   ├── json                # editor JSON
//!     │   ├── text                # legacy plain text
//!     │   └── treeviz             # inspection tree
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── transforms.rs           # content-level pipelines
//!     └── meta.rs                 # slug and post metadata
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── <area>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so the areas are
//!     gathered as modules of tests/lib.rs.
//!
//! Core Algorithms
//!
//!     Detection is an attempted decode. A string that parses as JSON with a `"doc"` type and a
//!     content array is structured; anything else is plain text, and decode failures are never
//!     surfaced (./detect.rs).
//!
//!     Compilation classifies each line on its own (./common/classify.rs) and threads a single
//!     piece of state between lines: the run of list items not yet flushed
//!     (./common/compile.rs). Only strictly consecutive items of one kind share a list.
//!
//!     Rendering and extraction are stateless pre-order walks of the tree. Both are total:
//!     unknown node types contribute their children or nothing, unknown marks are skipped.
//!
//! Lossy Conversions
//!
//!     Plain text and the structured form do not round-trip. Extraction drops marks, images and
//!     code block languages, and the all-caps heading rule turns shouted lines into headings
//!     when the text is compiled again. A document of plain paragraphs does stabilize after one
//!     compile / extract cycle.
//!
pub mod common;
pub mod detect;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod meta;
pub mod registry;
pub mod transforms;

pub use common::compile::{compile, compile_content, compile_plain_text};
pub use common::extract::{excerpt, plain_text, reading_time, word_count};
pub use detect::{detect, is_structured, parse_document, Content, Detected};
pub use error::FormatError;
pub use format::Format;
pub use formats::html::{render_html, HtmlOptions};
pub use ir::nodes::{Document, ListKind, Mark, Node};
pub use meta::{slugify, PostMeta};
pub use registry::FormatRegistry;
pub use transforms::{
    content_excerpt, content_plain_text, content_reading_time, migrate_content, render_content,
};
