//! Block phase of the chat markdown parser.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{AlertType, AstNode, BlockNode, InlineNode, ListItem};
use crate::emoji::{CustomEmojiLookup, CustomEmojiTable, EmojiIndex, UnicodeEmojiLookup};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)").expect("valid heading pattern"));
static HEADING_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s").expect("valid heading start pattern"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s(.*)").expect("valid ordered item pattern"));
static ALERT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\[!(note|tip|important|warning|caution)\](.*)").expect("valid alert pattern")
});

static NO_CUSTOM_EMOJIS: CustomEmojiTable = CustomEmojiTable::empty();

/// Parse a message with the bundled emoji index and no custom emoji.
pub fn parse_markdown(content: &str) -> Vec<AstNode> {
    Parser::default().parse(content)
}

/// Parse a span with the inline rules only.
pub fn parse_inline(text: &str) -> Vec<InlineNode> {
    Parser::default().parse_inline(text)
}

/// Chat markdown parser bound to its emoji collaborators.
///
/// Parsing is total: every input produces a tree, and malformed markup
/// degrades to literal text.
#[derive(Clone, Copy)]
pub struct Parser<'a> {
    pub(super) custom: &'a dyn CustomEmojiLookup,
    pub(super) unicode: &'a dyn UnicodeEmojiLookup,
}

impl<'a> Parser<'a> {
    pub fn new(custom: &'a dyn CustomEmojiLookup, unicode: &'a dyn UnicodeEmojiLookup) -> Self {
        Self { custom, unicode }
    }

    /// Parse a whole message into block and inline nodes.
    pub fn parse(&self, content: &str) -> Vec<AstNode> {
        if content.is_empty() {
            return Vec::new();
        }

        let lines: Vec<&str> = content.split('\n').collect();
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if let Some(info) = line.strip_prefix("```") {
                let (block, next) = code_block(&lines, i + 1, info);
                nodes.push(block.into());
                i = next;
                continue;
            }

            if let Some(caps) = HEADING.captures(line)
                && !caps[2].trim().is_empty()
            {
                nodes.push(
                    BlockNode::Heading {
                        level: u8::try_from(caps[1].len()).unwrap_or(6),
                        children: self.parse_inline(&caps[2]),
                    }
                    .into(),
                );
                i += 1;
                continue;
            }

            if is_quote_line(line) {
                let mut quoted = Vec::new();
                while i < lines.len() && is_quote_line(lines[i]) {
                    quoted.push(lines[i].strip_prefix("> ").unwrap_or(""));
                    i += 1;
                }
                nodes.push(self.blockquote(&quoted.join("\n")).into());
                continue;
            }

            // Must precede the unordered list check.
            if let Some(rest) = line.strip_prefix("-# ") {
                nodes.push(
                    BlockNode::Subtext {
                        children: self.parse_inline(rest),
                    }
                    .into(),
                );
                i += 1;
                continue;
            }

            if line.starts_with("- ") {
                let mut items = Vec::new();
                while let Some(rest) = lines.get(i).and_then(|l| l.strip_prefix("- ")) {
                    items.push(ListItem {
                        children: self.parse_inline(rest),
                        ordinal: None,
                    });
                    i += 1;
                }
                nodes.push(
                    BlockNode::List {
                        ordered: false,
                        items,
                    }
                    .into(),
                );
                continue;
            }

            if ORDERED_ITEM.is_match(line) {
                let mut items = Vec::new();
                let mut ordinal = 1;
                while let Some(caps) = lines.get(i).and_then(|l| ORDERED_ITEM.captures(l)) {
                    items.push(ListItem {
                        children: self.parse_inline(&caps[1]),
                        ordinal: Some(ordinal),
                    });
                    ordinal += 1;
                    i += 1;
                }
                nodes.push(
                    BlockNode::List {
                        ordered: true,
                        items,
                    }
                    .into(),
                );
                continue;
            }

            if line.trim().is_empty() {
                i += 1;
                continue;
            }

            // Plain text run. The first line is always taken, even when it
            // looks like a block start that failed its own rule (`# `).
            let start = i;
            i += 1;
            while i < lines.len() && !lines[i].trim().is_empty() && !is_block_start(lines[i]) {
                i += 1;
            }
            let run = lines[start..i].join("\n");
            nodes.extend(self.parse_inline(&run).into_iter().map(AstNode::Inline));
        }

        nodes
    }

    fn blockquote(&self, content: &str) -> BlockNode {
        let Some(caps) = ALERT.captures(content) else {
            return BlockNode::Blockquote {
                children: self.parse_inline(content),
            };
        };
        let alert_type = AlertType::from_keyword(&caps[1]).unwrap_or(AlertType::Note);
        let body = caps[2].trim();
        BlockNode::Alert {
            alert_type,
            children: if body.is_empty() {
                Vec::new()
            } else {
                self.parse_inline(body)
            },
        }
    }
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new(&NO_CUSTOM_EMOJIS, EmojiIndex::bundled())
    }
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

/// Collect a fenced code block whose body starts at `start`.
///
/// Returns the block and the index of the first line after it. A missing
/// closing fence ends the block at end of input.
fn code_block(lines: &[&str], start: usize, info: &str) -> (BlockNode, usize) {
    let language = Some(info.trim())
        .filter(|lang| !lang.is_empty())
        .map(ToString::to_string);

    let mut end = start;
    while end < lines.len() && !lines[end].starts_with("```") {
        end += 1;
    }
    let body = &lines[start..end];
    let mut content = body.join("\n");
    if !body.is_empty() {
        content.push('\n');
    }

    let next = if end < lines.len() { end + 1 } else { end };
    (BlockNode::CodeBlock { content, language }, next)
}

fn is_quote_line(line: &str) -> bool {
    line == ">" || line.starts_with("> ")
}

fn is_block_start(line: &str) -> bool {
    line.starts_with("```")
        || HEADING_START.is_match(line)
        || is_quote_line(line)
        || line.starts_with("-# ")
        || line.starts_with("- ")
        || ORDERED_ITEM.is_match(line)
}
