//! Inline phase: emphasis, code spans, tokens and shortcodes.

use std::sync::LazyLock;

use regex::Regex;

use super::parser::Parser;
use super::timestamp::TimestampStyle;
use super::types::{EmojiKind, InlineNode, MentionKind};

/// Longest shortcode name between the colons.
const MAX_SHORTCODE_LEN: usize = 38;

static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<t:([0-9]+):([a-zA-Z])>").expect("valid timestamp pattern"));
static ROLE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@&([0-9]+)>").expect("valid role mention pattern"));
static USER_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@([0-9]+)>").expect("valid user mention pattern"));
static CHANNEL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<#([0-9]+)>").expect("valid channel mention pattern"));
static CUSTOM_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<a:([A-Za-z0-9_]+):([0-9]+)>").expect("valid custom emoji pattern")
});

#[derive(Debug, Clone, Copy)]
enum Emphasis {
    Bold,
    Underline,
    Strikethrough,
    Spoiler,
}

impl Emphasis {
    fn wrap(self, children: Vec<InlineNode>) -> InlineNode {
        match self {
            Self::Bold => InlineNode::Bold { children },
            Self::Underline => InlineNode::Underline { children },
            Self::Strikethrough => InlineNode::Strikethrough { children },
            Self::Spoiler => InlineNode::Spoiler { children },
        }
    }
}

/// Two-character markers, tried in this order.
const EMPHASIS_MARKERS: [(&str, Emphasis); 4] = [
    ("**", Emphasis::Bold),
    ("__", Emphasis::Underline),
    ("~~", Emphasis::Strikethrough),
    ("||", Emphasis::Spoiler),
];

/// A recognized token and the number of bytes it spans.
type Token = (InlineNode, usize);

impl Parser<'_> {
    /// Parse a span of text into inline nodes.
    ///
    /// Never fails: anything that is not a complete token is kept as text.
    pub fn parse_inline(&self, text: &str) -> Vec<InlineNode> {
        let mut nodes = Vec::new();
        let mut literal = String::new();
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            let rest = &text[pos..];
            if let Some((node, len)) = self.token(rest) {
                flush_literal(&mut literal, &mut nodes);
                nodes.push(node);
                pos += len;
                continue;
            }
            literal.push(ch);
            pos += ch.len_utf8();
        }

        flush_literal(&mut literal, &mut nodes);
        nodes
    }

    fn token(&self, rest: &str) -> Option<Token> {
        inline_code(rest)
            .or_else(|| angle_token(rest))
            .or_else(|| self.shortcode(rest))
            .or_else(|| self.emphasis(rest))
            .or_else(|| self.italic(rest))
    }

    fn shortcode(&self, rest: &str) -> Option<Token> {
        let after = rest.strip_prefix(':')?;
        let end = after.find(':')?;
        let name = &after[..end];
        if name.is_empty()
            || name.chars().count() > MAX_SHORTCODE_LEN
            || name.chars().any(char::is_whitespace)
        {
            return None;
        }

        let kind = if let Some(custom) = self.custom.find_custom(name) {
            EmojiKind::Custom {
                name: custom.name,
                id: custom.id,
            }
        } else {
            let surrogates = self.unicode.find_unicode(name)?;
            EmojiKind::Unicode {
                name: name.to_string(),
                surrogates: surrogates.to_string(),
            }
        };
        Some((InlineNode::Emoji { kind }, end + 2))
    }

    // A marker closes at its first repeat, so a kind never nests inside
    // itself and recursion depth is bounded by the number of marker kinds.
    fn emphasis(&self, rest: &str) -> Option<Token> {
        EMPHASIS_MARKERS.iter().find_map(|&(marker, emphasis)| {
            let after = rest.strip_prefix(marker)?;
            let end = after.find(marker).filter(|&end| end > 0)?;
            let children = self.parse_inline(&after[..end]);
            Some((emphasis.wrap(children), end + 2 * marker.len()))
        })
    }

    fn italic(&self, rest: &str) -> Option<Token> {
        let after = rest.strip_prefix('*')?;
        if after.starts_with('*') {
            return None;
        }
        let end = after.find('*').filter(|&end| end > 0)?;
        let children = self.parse_inline(&after[..end]);
        Some((InlineNode::Italic { children }, end + 2))
    }
}

fn flush_literal(literal: &mut String, nodes: &mut Vec<InlineNode>) {
    if !literal.is_empty() {
        nodes.push(InlineNode::text(std::mem::take(literal)));
    }
}

fn inline_code(rest: &str) -> Option<Token> {
    let after = rest.strip_prefix('`')?;
    let end = after.find('`').filter(|&end| end > 0)?;
    let content = after[..end].to_string();
    Some((InlineNode::InlineCode { content }, end + 2))
}

fn angle_token(rest: &str) -> Option<Token> {
    if !rest.starts_with('<') {
        return None;
    }

    // Digits too long for u64 leave the token unrecognized.
    if let Some(caps) = TIMESTAMP.captures(rest)
        && let Ok(timestamp) = caps[1].parse::<u64>()
    {
        let letter = caps[2].chars().next().unwrap_or('f');
        let node = InlineNode::Timestamp {
            timestamp,
            style: TimestampStyle::from_letter(letter),
        };
        return Some((node, caps[0].len()));
    }

    // Role before user: both start with `<@`.
    let mentions: [(&Regex, fn(String) -> MentionKind); 3] = [
        (&*ROLE_MENTION, |id| MentionKind::Role { id }),
        (&*USER_MENTION, |id| MentionKind::User { id }),
        (&*CHANNEL_MENTION, |id| MentionKind::Channel { id }),
    ];
    for (pattern, kind) in mentions {
        if let Some(caps) = pattern.captures(rest) {
            let node = InlineNode::Mention {
                kind: kind(caps[1].to_string()),
            };
            return Some((node, caps[0].len()));
        }
    }

    let caps = CUSTOM_EMOJI.captures(rest)?;
    let kind = EmojiKind::Custom {
        name: caps[1].to_string(),
        id: caps[2].to_string(),
    };
    Some((InlineNode::Emoji { kind }, caps[0].len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emoji::{CustomEmoji, CustomEmojiTable, EmojiIndex};

    fn text(content: &str) -> InlineNode {
        InlineNode::text(content)
    }

    fn parse(input: &str) -> Vec<InlineNode> {
        Parser::default().parse_inline(input)
    }

    fn smile_index() -> EmojiIndex {
        EmojiIndex::from_json(
            r#"{"people": [{"names": ["smile"], "surrogates": "😄"}, {"names": ["+1"], "surrogates": "👍"}]}"#,
        )
        .unwrap()
    }

    fn custom_table(name: &str, id: &str) -> CustomEmojiTable {
        CustomEmojiTable::new(vec![CustomEmoji {
            id: id.to_string(),
            name: name.to_string(),
            guild_id: "1".to_string(),
            animated: false,
        }])
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_plain_text_is_one_node() {
        assert_eq!(parse("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(
            parse("**bold**"),
            vec![InlineNode::Bold {
                children: vec![text("bold")]
            }]
        );
    }

    #[test]
    fn test_unterminated_bold_is_literal() {
        assert_eq!(parse("**bold"), vec![text("**bold")]);
    }

    #[test]
    fn test_stray_markers_are_literal() {
        assert_eq!(parse("a ~~ b || c __"), vec![text("a ~~ b || c __")]);
        assert_eq!(parse("****"), vec![text("****")]);
    }

    #[test]
    fn test_each_emphasis_marker() {
        let nodes = parse("*a* **b** __c__ ~~d~~ ||e||");
        assert_eq!(
            nodes,
            vec![
                InlineNode::Italic {
                    children: vec![text("a")]
                },
                text(" "),
                InlineNode::Bold {
                    children: vec![text("b")]
                },
                text(" "),
                InlineNode::Underline {
                    children: vec![text("c")]
                },
                text(" "),
                InlineNode::Strikethrough {
                    children: vec![text("d")]
                },
                text(" "),
                InlineNode::Spoiler {
                    children: vec![text("e")]
                },
            ]
        );
    }

    #[test]
    fn test_nested_emphasis_parses_recursively() {
        assert_eq!(
            parse("**bold *and italic***"),
            vec![
                InlineNode::Bold {
                    children: vec![text("bold *and italic")]
                },
                text("*"),
            ]
        );
        assert_eq!(
            parse("||**secret**||"),
            vec![InlineNode::Spoiler {
                children: vec![InlineNode::Bold {
                    children: vec![text("secret")]
                }]
            }]
        );
    }

    #[test]
    fn test_single_star_after_failed_bold_can_open_italic() {
        assert_eq!(
            parse("**a*"),
            vec![
                text("*"),
                InlineNode::Italic {
                    children: vec![text("a")]
                }
            ]
        );
    }

    #[test]
    fn test_inline_code_is_verbatim() {
        assert_eq!(
            parse("run `**not bold**` now"),
            vec![
                text("run "),
                InlineNode::InlineCode {
                    content: "**not bold**".into()
                },
                text(" now"),
            ]
        );
    }

    #[test]
    fn test_empty_code_span_is_literal() {
        assert_eq!(parse("``"), vec![text("``")]);
        assert_eq!(parse("`open"), vec![text("`open")]);
    }

    #[test]
    fn test_mentions() {
        assert_eq!(
            parse("<@123>"),
            vec![InlineNode::Mention {
                kind: MentionKind::User { id: "123".into() }
            }]
        );
        assert_eq!(
            parse("<@&123>"),
            vec![InlineNode::Mention {
                kind: MentionKind::Role { id: "123".into() }
            }]
        );
        assert_eq!(
            parse("<#123>"),
            vec![InlineNode::Mention {
                kind: MentionKind::Channel { id: "123".into() }
            }]
        );
    }

    #[test]
    fn test_malformed_mentions_are_literal() {
        assert_eq!(parse("<@abc>"), vec![text("<@abc>")]);
        assert_eq!(parse("<@123"), vec![text("<@123")]);
        assert_eq!(parse("<#>"), vec![text("<#>")]);
    }

    #[test]
    fn test_timestamp_styles() {
        assert_eq!(
            parse("<t:1700000000:R>"),
            vec![InlineNode::Timestamp {
                timestamp: 1_700_000_000,
                style: TimestampStyle::RelativeTime
            }]
        );
        assert_eq!(
            parse("<t:1700000000:z>"),
            vec![InlineNode::Timestamp {
                timestamp: 1_700_000_000,
                style: TimestampStyle::ShortDateTime
            }]
        );
    }

    #[test]
    fn test_timestamp_overflowing_u64_is_literal() {
        let input = "<t:99999999999999999999999:R>";
        assert_eq!(parse(input), vec![text(input)]);
    }

    #[test]
    fn test_explicit_custom_emoji_token() {
        assert_eq!(
            parse("hi <a:party_parrot:9001>!"),
            vec![
                text("hi "),
                InlineNode::Emoji {
                    kind: EmojiKind::Custom {
                        name: "party_parrot".into(),
                        id: "9001".into()
                    }
                },
                text("!"),
            ]
        );
    }

    #[test]
    fn test_unicode_shortcode_resolves() {
        let custom = CustomEmojiTable::default();
        let index = smile_index();
        let parser = Parser::new(&custom, &index);
        assert_eq!(
            parser.parse_inline("nice :+1:"),
            vec![
                text("nice "),
                InlineNode::Emoji {
                    kind: EmojiKind::Unicode {
                        name: "+1".into(),
                        surrogates: "\u{1F44D}".into()
                    }
                },
            ]
        );
    }

    #[test]
    fn test_shortcode_lookup_is_case_sensitive_for_unicode() {
        let custom = CustomEmojiTable::default();
        let index = smile_index();
        let parser = Parser::new(&custom, &index);
        assert_eq!(parser.parse_inline(":Smile:"), vec![text(":Smile:")]);
    }

    #[test]
    fn test_custom_emoji_wins_over_unicode() {
        let custom = custom_table("smile", "77");
        let index = smile_index();
        let parser = Parser::new(&custom, &index);
        assert_eq!(
            parser.parse_inline(":smile:"),
            vec![InlineNode::Emoji {
                kind: EmojiKind::Custom {
                    name: "smile".into(),
                    id: "77".into()
                }
            }]
        );
    }

    #[test]
    fn test_custom_emoji_matches_case_insensitively() {
        let custom = custom_table("PartyParrot", "5");
        let index = EmojiIndex::default();
        let parser = Parser::new(&custom, &index);
        assert_eq!(
            parser.parse_inline(":partyparrot:"),
            vec![InlineNode::Emoji {
                kind: EmojiKind::Custom {
                    name: "PartyParrot".into(),
                    id: "5".into()
                }
            }]
        );
    }

    #[test]
    fn test_unresolved_shortcode_retries_after_first_colon() {
        let custom = CustomEmojiTable::default();
        let index = smile_index();
        let parser = Parser::new(&custom, &index);
        assert_eq!(
            parser.parse_inline("time 10:30:smile:"),
            vec![
                text("time 10:30"),
                InlineNode::Emoji {
                    kind: EmojiKind::Unicode {
                        name: "smile".into(),
                        surrogates: "\u{1F604}".into()
                    }
                },
            ]
        );
    }

    #[test]
    fn test_shortcode_rejects_whitespace_and_long_names() {
        let custom = custom_table(&"x".repeat(39), "1");
        let index = smile_index();
        let parser = Parser::new(&custom, &index);
        assert_eq!(parser.parse_inline(": smile:"), vec![text(": smile:")]);
        let long = format!(":{}:", "x".repeat(39));
        assert_eq!(parser.parse_inline(&long), vec![text(&long)]);
    }

    #[test]
    fn test_shortcode_checked_before_emphasis() {
        let custom = CustomEmojiTable::default();
        let index = smile_index();
        let parser = Parser::new(&custom, &index);
        assert_eq!(
            parser.parse_inline("*:smile:*"),
            vec![InlineNode::Italic {
                children: vec![InlineNode::Emoji {
                    kind: EmojiKind::Unicode {
                        name: "smile".into(),
                        surrogates: "\u{1F604}".into()
                    }
                }]
            }]
        );
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        assert_eq!(
            parse("héllo **wörld** 日本"),
            vec![
                text("héllo "),
                InlineNode::Bold {
                    children: vec![text("wörld")]
                },
                text(" 日本"),
            ]
        );
    }

    #[test]
    fn test_every_marker_kind_nests() {
        let italic = InlineNode::Italic {
            children: vec![text("x")],
        };
        let spoiler = InlineNode::Spoiler {
            children: vec![italic],
        };
        let strike = InlineNode::Strikethrough {
            children: vec![spoiler],
        };
        let underline = InlineNode::Underline {
            children: vec![strike],
        };
        assert_eq!(
            parse("**__~~||*x*||~~__**"),
            vec![InlineNode::Bold {
                children: vec![underline]
            }]
        );
    }

    #[test]
    fn test_repeated_marker_closes_at_first_repeat() {
        let input = format!("{}x{}", "||".repeat(400), "||".repeat(400));
        let nodes = parse(&input);
        assert_eq!(
            nodes,
            vec![
                text(&"|".repeat(798)),
                InlineNode::Spoiler {
                    children: vec![text("x")]
                },
                text(&"|".repeat(798)),
            ]
        );
    }
}
