//! Emoji dataset format and the bundled shortcode data.

use emojis::SkinTone;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tones in `_tone1` .. `_tone5` order.
const SKIN_TONES: [SkinTone; 5] = [
    SkinTone::Light,
    SkinTone::MediumLight,
    SkinTone::Medium,
    SkinTone::MediumDark,
    SkinTone::Dark,
];

/// A skin-tone variant of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiSkin {
    pub names: Vec<String>,
    pub surrogates: String,
}

/// One emoji in the dataset. The first name is the primary name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiEntry {
    pub names: Vec<String>,
    pub surrogates: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skins: Vec<EmojiSkin>,
}

impl EmojiEntry {
    /// The first-listed alias.
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

/// Errors raised while loading an emoji dataset.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed emoji catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("emoji #{position} in category `{category}` has no names")]
    EmptyNames { category: String, position: usize },

    #[error("skin variant of `{primary}` has no names")]
    EmptySkinNames { primary: String },
}

/// Every emoji with at least one shortcode, in Unicode CLDR order.
///
/// Skin variants are named `{alias}_tone{n}` for each alias of the base emoji.
pub fn bundled_catalog() -> Vec<EmojiEntry> {
    emojis::iter()
        .filter(|emoji| matches!(emoji.skin_tone(), None | Some(SkinTone::Default)))
        .filter_map(|emoji| {
            let names: Vec<String> = emoji.shortcodes().map(ToOwned::to_owned).collect();
            if names.is_empty() {
                return None;
            }
            let skins = SKIN_TONES
                .into_iter()
                .zip(1..)
                .filter_map(|(tone, n)| {
                    let variant = emoji.with_skin_tone(tone)?;
                    Some(EmojiSkin {
                        names: names.iter().map(|name| format!("{name}_tone{n}")).collect(),
                        surrogates: variant.as_str().to_owned(),
                    })
                })
                .collect();
            Some(EmojiEntry {
                names,
                surrogates: emoji.as_str().to_owned(),
                skins,
            })
        })
        .collect()
}

/// Parse a dataset: a JSON object mapping category name to an array of
/// entries. Entries are returned in catalog order (categories in file order,
/// entries in array order).
pub fn parse_catalog(json: &str) -> Result<Vec<EmojiEntry>, CatalogError> {
    let categories: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    let mut entries = Vec::new();
    for (category, value) in categories {
        let category_entries: Vec<EmojiEntry> = serde_json::from_value(value)?;
        for (position, entry) in category_entries.into_iter().enumerate() {
            let Some(primary) = entry.primary_name() else {
                return Err(CatalogError::EmptyNames { category, position });
            };
            if entry.skins.iter().any(|skin| skin.names.is_empty()) {
                return Err(CatalogError::EmptySkinNames {
                    primary: primary.to_string(),
                });
            }
            entries.push(entry);
        }
    }
    Ok(entries)
}
