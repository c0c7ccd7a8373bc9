//! Grouping and flattening helpers for renderers.

use super::types::{AstNode, BlockNode, EmojiKind, InlineNode, MentionKind};

/// A renderable unit of a parsed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A maximal run of adjacent top-level inline nodes
    Paragraph(Vec<&'a InlineNode>),
    Block(&'a BlockNode),
}

/// Group top-level nodes into paragraphs and blocks, in document order.
pub fn segments(nodes: &[AstNode]) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut paragraph = Vec::new();

    for node in nodes {
        match node {
            AstNode::Inline(inline) => paragraph.push(inline),
            AstNode::Block(block) => {
                if !paragraph.is_empty() {
                    out.push(Segment::Paragraph(std::mem::take(&mut paragraph)));
                }
                out.push(Segment::Block(block));
            }
        }
    }
    if !paragraph.is_empty() {
        out.push(Segment::Paragraph(paragraph));
    }
    out
}

/// Visible text of inline nodes, markers removed.
pub fn plain_text<'a>(nodes: impl IntoIterator<Item = &'a InlineNode>) -> String {
    let mut out = String::new();
    for node in nodes {
        push_inline(&mut out, node);
    }
    out
}

fn push_inline(out: &mut String, node: &InlineNode) {
    match node {
        InlineNode::Text { content } | InlineNode::InlineCode { content } => out.push_str(content),
        InlineNode::Bold { children }
        | InlineNode::Italic { children }
        | InlineNode::Underline { children }
        | InlineNode::Strikethrough { children }
        | InlineNode::Spoiler { children } => {
            for child in children {
                push_inline(out, child);
            }
        }
        InlineNode::Timestamp { timestamp, style } => {
            out.push_str(&format!("<t:{timestamp}:{}>", style.letter()));
        }
        InlineNode::Mention { kind } => {
            let prefix = match kind {
                MentionKind::Channel { .. } => '#',
                MentionKind::User { .. } | MentionKind::Role { .. } => '@',
            };
            out.push(prefix);
            out.push_str(kind.id());
        }
        InlineNode::Emoji { kind } => match kind {
            EmojiKind::Unicode { surrogates, .. } => out.push_str(surrogates),
            EmojiKind::Custom { name, .. } => {
                out.push(':');
                out.push_str(name);
                out.push(':');
            }
        },
    }
}

/// Plain text of a whole message, one line per paragraph, block or list item.
pub fn document_text(nodes: &[AstNode]) -> String {
    let mut lines = Vec::new();
    for segment in segments(nodes) {
        match segment {
            Segment::Paragraph(inlines) => lines.push(plain_text(inlines)),
            Segment::Block(block) => match block {
                BlockNode::Heading { children, .. }
                | BlockNode::Blockquote { children }
                | BlockNode::Alert { children, .. }
                | BlockNode::Subtext { children } => lines.push(plain_text(children)),
                BlockNode::CodeBlock { content, .. } => {
                    lines.push(content.strip_suffix('\n').unwrap_or(content).to_string());
                }
                BlockNode::List { items, .. } => {
                    for item in items {
                        let marker = item
                            .ordinal
                            .map_or_else(|| "-".to_string(), |n| format!("{n}."));
                        lines.push(format!("{marker} {}", plain_text(&item.children)));
                    }
                }
            },
        }
    }
    lines.join("\n")
}
