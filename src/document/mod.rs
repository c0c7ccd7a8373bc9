//! Chat markdown parsing.
//!
//! This module handles:
//! - Splitting a message into blocks (code fences, headings, quotes, lists)
//! - Parsing inline markup, mentions, timestamps and emoji shortcodes
//! - Grouping the resulting tree for renderers

mod inline;
mod parser;
mod segments;
mod timestamp;
mod types;

pub use parser::{Parser, parse_inline, parse_markdown};
pub use segments::{Segment, document_text, plain_text, segments};
pub use timestamp::{TimestampStyle, format_relative};
pub use types::{AlertType, AstNode, BlockNode, EmojiKind, InlineNode, ListItem, MentionKind};

/// A parsed chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Original message text
    source: String,
    /// Top-level nodes in document order
    nodes: Vec<AstNode>,
}

impl Document {
    /// Parse with the bundled emoji index and no custom emoji.
    ///
    /// # Example
    ///
    /// ```
    /// use chatmark::document::Document;
    ///
    /// let doc = Document::parse("# Hello\n**world**");
    /// assert_eq!(doc.nodes().len(), 2);
    /// assert_eq!(doc.text(), "Hello\nworld");
    /// ```
    pub fn parse(source: &str) -> Self {
        Self::parse_with(&Parser::default(), source)
    }

    pub fn parse_with(parser: &Parser<'_>, source: &str) -> Self {
        let _scope = crate::perf::scope("document.parse");
        Self {
            source: source.to_string(),
            nodes: parser.parse(source),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[AstNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<AstNode> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Paragraph and block segments for rendering.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        segments(&self.nodes)
    }

    /// Plain text with all markup removed.
    pub fn text(&self) -> String {
        document_text(&self.nodes)
    }
}
