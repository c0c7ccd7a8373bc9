//! Image asset locations for emoji.

use super::surrogates_to_filename;

/// Twemoji SVG set used for Unicode emoji.
pub const TWEMOJI_BASE: &str = "https://cdn.jsdelivr.net/gh/jdecked/twemoji@latest/assets/svg/";

/// URL of the SVG for a Unicode emoji under `base`.
pub fn unicode_asset_url(base: &str, surrogates: &str) -> String {
    format!("{base}{}.svg", surrogates_to_filename(surrogates))
}

/// URL of a custom emoji image on the content CDN.
pub fn custom_asset_url(cdn_base: &str, id: &str) -> String {
    format!("{}/emojis/{id}", cdn_base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_asset_url_uses_filename() {
        assert_eq!(
            unicode_asset_url(TWEMOJI_BASE, "\u{2764}\u{FE0F}"),
            "https://cdn.jsdelivr.net/gh/jdecked/twemoji@latest/assets/svg/2764.svg"
        );
    }

    #[test]
    fn test_custom_asset_url_joins_path() {
        assert_eq!(
            custom_asset_url("https://cdn.example.com/", "123"),
            "https://cdn.example.com/emojis/123"
        );
    }
}
