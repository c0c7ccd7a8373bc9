//! Shortcode completion while composing a message.

use serde::Serialize;

use super::{CustomEmojiTable, EmojiIndex};

/// The `:fragment` being typed at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiQuery {
    /// Text after the colon, up to the cursor
    pub query: String,
    /// Char index of the colon
    pub start: usize,
}

/// What a suggestion would insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum SuggestionKind {
    Custom { id: String },
    Unicode { surrogates: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub name: String,
    pub kind: SuggestionKind,
    /// Text that replaces the query, trailing space included
    pub insert_text: String,
}

/// Find the emoji query ending at `cursor` (a char index).
///
/// The cursor must sit after a colon followed by at least two characters,
/// none of which is whitespace or another colon.
pub fn emoji_query_at(text: &str, cursor: usize) -> Option<EmojiQuery> {
    let before: Vec<char> = text.chars().take(cursor).collect();
    let start = before.iter().rposition(|&c| c == ':')?;
    let fragment = &before[start + 1..];
    if fragment.len() < 2 || fragment.iter().any(|c| c.is_whitespace()) {
        return None;
    }
    Some(EmojiQuery {
        query: fragment.iter().collect(),
        start,
    })
}

/// Custom emoji first (prefix, then substring matches), then Unicode emoji.
///
/// Custom emoji from another guild than `guild_id` are inserted in the
/// explicit `<a:name:id>` form so they resolve without the guild table.
pub fn suggest(
    query: &str,
    custom: &CustomEmojiTable,
    guild_id: Option<&str>,
    index: &EmojiIndex,
    limit: usize,
) -> Vec<Suggestion> {
    if query.is_empty() {
        return Vec::new();
    }
    let query = query.to_lowercase();

    let mut prefix = Vec::new();
    let mut contains = Vec::new();
    for emoji in custom.iter() {
        let name = emoji.name.to_lowercase();
        let same_guild = guild_id.is_some_and(|id| id == emoji.guild_id);
        let insert_text = if same_guild {
            format!(":{}: ", emoji.name)
        } else {
            format!("<a:{}:{}> ", emoji.name, emoji.id)
        };
        let suggestion = Suggestion {
            name: emoji.name.clone(),
            kind: SuggestionKind::Custom {
                id: emoji.id.clone(),
            },
            insert_text,
        };
        if name.starts_with(&query) {
            prefix.push(suggestion);
        } else if name.contains(&query) {
            contains.push(suggestion);
        }
    }

    let unicode = index.search(&query, limit).into_iter().map(|m| Suggestion {
        insert_text: format!(":{}: ", m.name),
        name: m.name,
        kind: SuggestionKind::Unicode {
            surrogates: m.surrogates,
        },
    });

    prefix
        .into_iter()
        .chain(contains)
        .chain(unicode)
        .take(limit)
        .collect()
}
