//! Name lookup and search over the emoji dataset.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use super::catalog::{CatalogError, EmojiEntry, bundled_catalog, parse_catalog};

static BUNDLED: LazyLock<EmojiIndex> = LazyLock::new(|| {
    let _scope = crate::perf::scope("emoji.index.load_bundled");
    EmojiIndex::from_entries(&bundled_catalog())
});

/// A primary emoji name and its glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiMatch {
    pub name: String,
    pub surrogates: String,
}

/// Read-only shortcode index built once from a dataset.
#[derive(Debug, Clone, Default)]
pub struct EmojiIndex {
    /// Every alias and every skin-tone alias
    by_name: HashMap<String, String>,
    /// Primary names only, in catalog order
    primary: Vec<EmojiMatch>,
}

impl EmojiIndex {
    /// Build an index from catalog entries, in catalog order.
    pub fn from_entries(entries: &[EmojiEntry]) -> Self {
        let mut by_name = HashMap::new();
        let mut primary = Vec::with_capacity(entries.len());

        for entry in entries {
            for name in &entry.names {
                by_name.insert(name.clone(), entry.surrogates.clone());
            }
            if let Some(name) = entry.primary_name() {
                primary.push(EmojiMatch {
                    name: name.to_string(),
                    surrogates: entry.surrogates.clone(),
                });
            }
            for skin in &entry.skins {
                for name in &skin.names {
                    by_name.insert(name.clone(), skin.surrogates.clone());
                }
            }
        }

        tracing::debug!(
            names = by_name.len(),
            primary = primary.len(),
            "built emoji index"
        );
        Self { by_name, primary }
    }

    /// Build an index from a JSON dataset (category name → entries).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::from_entries(&parse_catalog(json)?))
    }

    /// The process-wide index over the full Unicode emoji set.
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    /// Exact, case-sensitive lookup of any alias or skin-tone alias.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Search primary names case-insensitively.
    ///
    /// Prefix matches come first, then names that merely contain the query.
    /// Both groups keep catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<EmojiMatch> {
        if query.is_empty() {
            return Vec::new();
        }
        let query = query.to_lowercase();

        let mut prefix = Vec::new();
        let mut contains = Vec::new();
        for entry in &self.primary {
            let name = entry.name.to_lowercase();
            if name.starts_with(&query) {
                prefix.push(entry);
            } else if name.contains(&query) {
                contains.push(entry);
            }
        }

        prefix
            .into_iter()
            .chain(contains)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of resolvable names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Hyphen-joined lowercase hex code points of an emoji, without U+FE0F.
///
/// This is the file stem used by Twemoji-style asset sets.
pub fn surrogates_to_filename(surrogates: &str) -> String {
    surrogates
        .chars()
        .filter(|&c| c != '\u{FE0F}')
        .map(|c| format!("{:x}", u32::from(c)))
        .collect::<Vec<_>>()
        .join("-")
}
