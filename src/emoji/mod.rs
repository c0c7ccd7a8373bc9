//! Emoji resolution.
//!
//! This module handles:
//! - Building a shortcode index from the bundled Unicode set or a JSON dataset
//! - Ranked shortcode search for autocomplete
//! - The guild custom emoji table consulted by the parser
//! - Asset file names and URLs for rendering

mod assets;
mod autocomplete;
mod catalog;
mod custom;
mod index;

pub use assets::{TWEMOJI_BASE, custom_asset_url, unicode_asset_url};
pub use autocomplete::{EmojiQuery, Suggestion, SuggestionKind, emoji_query_at, suggest};
pub use catalog::{CatalogError, EmojiEntry, EmojiSkin, bundled_catalog, parse_catalog};
pub use custom::{CustomEmoji, CustomEmojiTable};
pub use index::{EmojiIndex, EmojiMatch, surrogates_to_filename};

/// Identity of a resolved custom emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEmojiRef {
    pub id: String,
    pub name: String,
}

/// Case-insensitive lookup of custom emoji by name.
pub trait CustomEmojiLookup: Sync {
    fn find_custom(&self, name: &str) -> Option<CustomEmojiRef>;
}

/// Case-sensitive lookup of Unicode emoji surrogates by shortcode name.
pub trait UnicodeEmojiLookup: Sync {
    fn find_unicode(&self, name: &str) -> Option<&str>;
}

impl UnicodeEmojiLookup for EmojiIndex {
    fn find_unicode(&self, name: &str) -> Option<&str> {
        self.resolve(name)
    }
}
