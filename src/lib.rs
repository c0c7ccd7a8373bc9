#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. emoji::EmojiIndex)
    clippy::module_name_repetitions
)]

//! # Chatmark
//!
//! A parser for the markdown dialect used in chat messages.
//!
//! Chatmark turns raw message text into a typed tree with:
//! - Headings, fenced code blocks, blockquotes and `[!NOTE]`-style alerts
//! - Ordered and unordered lists, and `-#` subtext
//! - Bold, italic, underline, strikethrough and spoiler emphasis
//! - Inline code, user/role/channel mentions and timestamps
//! - Unicode shortcode and custom guild emoji
//!
//! ## Architecture
//!
//! Parsing runs in two phases over each message:
//! - **Block**: a single forward pass over lines
//! - **Inline**: a left-to-right scan of each block's text
//!
//! Emoji shortcodes are resolved through collaborators passed to
//! [`document::Parser`], so the parser holds no global state beyond the
//! read-only bundled emoji index.
//!
//! ## Modules
//!
//! - [`document`]: Parsing and the document tree
//! - [`emoji`]: Emoji index, custom emoji, autocomplete and assets
//! - [`config`]: Command-line defaults
//! - [`perf`]: Timing instrumentation

pub mod config;
pub mod document;
pub mod emoji;
pub mod perf;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{
        AstNode, BlockNode, Document, InlineNode, Parser, parse_inline, parse_markdown,
    };
    pub use crate::emoji::{CustomEmoji, CustomEmojiTable, EmojiIndex};
}
