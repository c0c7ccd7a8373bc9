//! Core document types.
//!
//! Nodes serialize in the wire shape used by chat clients: objects tagged by
//! `"type"`, with mention and emoji targets tagged by `"kind"`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::timestamp::TimestampStyle;

/// A top-level node: either a block construct or a bare inline node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AstNode {
    Inline(InlineNode),
    Block(BlockNode),
}

impl AstNode {
    pub const fn is_block(&self) -> bool {
        matches!(self, Self::Block(_))
    }

    pub const fn as_inline(&self) -> Option<&InlineNode> {
        match self {
            Self::Inline(node) => Some(node),
            Self::Block(_) => None,
        }
    }
}

impl From<InlineNode> for AstNode {
    fn from(node: InlineNode) -> Self {
        Self::Inline(node)
    }
}

impl From<BlockNode> for AstNode {
    fn from(node: BlockNode) -> Self {
        Self::Block(node)
    }
}

/// Inline content. Emphasis variants hold nested inline children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InlineNode {
    Text { content: String },
    Bold { children: Vec<InlineNode> },
    Italic { children: Vec<InlineNode> },
    Underline { children: Vec<InlineNode> },
    Strikethrough { children: Vec<InlineNode> },
    Spoiler { children: Vec<InlineNode> },
    InlineCode { content: String },
    Timestamp { timestamp: u64, style: TimestampStyle },
    Mention { kind: MentionKind },
    Emoji { kind: EmojiKind },
}

impl InlineNode {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Nested children of an emphasis node.
    pub fn children(&self) -> Option<&[Self]> {
        match self {
            Self::Bold { children }
            | Self::Italic { children }
            | Self::Underline { children }
            | Self::Strikethrough { children }
            | Self::Spoiler { children } => Some(children),
            _ => None,
        }
    }
}

/// Target of a mention token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MentionKind {
    User { id: String },
    Channel { id: String },
    Role { id: String },
}

impl MentionKind {
    pub fn id(&self) -> &str {
        match self {
            Self::User { id } | Self::Channel { id } | Self::Role { id } => id,
        }
    }
}

/// A resolved emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EmojiKind {
    Unicode { name: String, surrogates: String },
    Custom { name: String, id: String },
}

/// Block constructs. Blocks never contain other blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockNode {
    Heading {
        level: u8,
        children: Vec<InlineNode>,
    },
    CodeBlock {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    Blockquote {
        children: Vec<InlineNode>,
    },
    Alert {
        #[serde(rename = "alertType")]
        alert_type: AlertType,
        children: Vec<InlineNode>,
    },
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    Subtext {
        children: Vec<InlineNode>,
    },
}

/// One list entry. Ordered lists number items 1, 2, 3, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<InlineNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<u32>,
}

/// Kind of a `> [!KIND]` alert blockquote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertType {
    /// Match an alert keyword, ignoring case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "note" => Some(Self::Note),
            "tip" => Some(Self::Tip),
            "important" => Some(Self::Important),
            "warning" => Some(Self::Warning),
            "caution" => Some(Self::Caution),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
