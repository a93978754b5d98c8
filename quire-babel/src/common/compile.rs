//! Plain-text to document compiler.
//!
//! Legacy posts are compiled line by line. The only state carried between lines is the list
//! accumulator, held in an explicit [`CompilerState`] value that each line consumes and returns:
//!
//! - a blank line, heading, blockquote or paragraph line flushes the pending list;
//! - a list item of a different kind flushes before it is buffered;
//! - consecutive items of the same kind merge into one list block.
//!
//! Compilation is total. Any input yields a document with at least one block.

use super::classify::{classify_line, LineClass};
use crate::detect::{detect, Content, Detected};
use crate::ir::nodes::{Document, ListKind, Node};

/// Buffered run of list items not yet turned into a list block.
#[derive(Debug, Default, Clone, PartialEq)]
struct PendingList {
    kind: Option<ListKind>,
    items: Vec<String>,
}

/// Compiler state threaded from one line to the next.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompilerState {
    blocks: Vec<Node>,
    pending: PendingList,
}

impl CompilerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one line of input.
    pub fn feed(mut self, line: &str) -> Self {
        match classify_line(line) {
            LineClass::Blank => self.flush(),
            LineClass::Heading(heading) => {
                self.flush();
                self.push(Node::heading(heading.level, &heading.text));
            }
            LineClass::Blockquote { text } => {
                self.flush();
                self.push(Node::blockquote(&text));
            }
            LineClass::ListItem(item) => {
                if self.pending.kind.is_some_and(|kind| kind != item.kind) {
                    self.flush();
                }
                self.pending.kind = Some(item.kind);
                self.pending.items.push(item.text);
            }
            LineClass::Paragraph { text } => {
                self.flush();
                self.push(Node::paragraph(&text));
            }
        }
        self
    }

    /// Flush what is pending and produce the document.
    pub fn finish(mut self) -> Document {
        self.flush();
        if self.blocks.is_empty() {
            return Document::default();
        }
        Document::new(self.blocks)
    }

    /// Blocks completed so far.
    pub fn blocks(&self) -> &[Node] {
        &self.blocks
    }

    /// Number of list items waiting to be flushed.
    pub fn pending_items(&self) -> usize {
        self.pending.items.len()
    }

    fn flush(&mut self) {
        let PendingList { kind, items } = std::mem::take(&mut self.pending);
        if let Some(kind) = kind {
            if !items.is_empty() {
                self.push(Node::list(kind, &items));
            }
        }
    }

    fn push(&mut self, block: Node) {
        tracing::trace!(block = block.type_name(), "compiled block");
        self.blocks.push(block);
    }
}

/// Compile legacy plain text, without format detection.
pub fn compile_plain_text(text: &str) -> Document {
    text.split('\n')
        .fold(CompilerState::new(), CompilerState::feed)
        .finish()
}

/// Compile content of any stored form into a document.
///
/// Structured content is returned as decoded; empty content yields the default document.
pub fn compile_content(content: Content<'_>) -> Document {
    match detect(content) {
        Detected::Empty => Document::default(),
        Detected::Structured(doc) => doc,
        Detected::PlainText(text) => compile_plain_text(text),
    }
}

/// Compile a stored string: serialized documents pass through, plain text is compiled.
pub fn compile(source: &str) -> Document {
    compile_content(Content::Text(source))
}
