//! Guild custom emoji supplied by the surrounding application.

use serde::{Deserialize, Serialize};

use super::{CustomEmojiLookup, CustomEmojiRef};

/// A custom emoji as delivered by the guild emoji endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEmoji {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub guild_id: String,
    #[serde(default)]
    pub animated: bool,
}

/// Custom emoji from every guild the user is in, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomEmojiTable {
    emojis: Vec<CustomEmoji>,
}

impl CustomEmojiTable {
    pub const fn empty() -> Self {
        Self { emojis: Vec::new() }
    }

    pub fn new(emojis: Vec<CustomEmoji>) -> Self {
        let mut table = Self::default();
        for emoji in emojis {
            table.upsert(emoji);
        }
        table
    }

    /// Parse a JSON array of custom emoji.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Replace every emoji of `guild_id` with `emojis`.
    pub fn replace_guild(&mut self, guild_id: &str, emojis: Vec<CustomEmoji>) {
        self.remove_guild(guild_id);
        for mut emoji in emojis {
            emoji.guild_id = guild_id.to_string();
            self.upsert(emoji);
        }
    }

    pub fn remove_guild(&mut self, guild_id: &str) {
        self.emojis.retain(|emoji| emoji.guild_id != guild_id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomEmoji> {
        self.emojis.iter()
    }

    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    // Emoji are keyed by id; a repeated id replaces the earlier one in place.
    fn upsert(&mut self, emoji: CustomEmoji) {
        if let Some(slot) = self.emojis.iter_mut().find(|e| e.id == emoji.id) {
            *slot = emoji;
        } else {
            self.emojis.push(emoji);
        }
    }
}

impl CustomEmojiLookup for CustomEmojiTable {
    fn find_custom(&self, name: &str) -> Option<CustomEmojiRef> {
        let wanted = name.to_lowercase();
        self.emojis
            .iter()
            .find(|emoji| emoji.name.to_lowercase() == wanted)
            .map(|emoji| CustomEmojiRef {
                id: emoji.id.clone(),
                name: emoji.name.clone(),
            })
    }
}
