//! Timestamp token styles and relative-time formatting.

use serde::{Deserialize, Serialize};

/// Display style selected by the letter in `<t:SECONDS:LETTER>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimestampStyle {
    RelativeTime,
    LongTime,
    ShortTime,
    ShortDate,
    LongDate,
    #[default]
    ShortDateTime,
    LongDateTime,
}

impl TimestampStyle {
    /// Map a style letter; unknown letters fall back to `ShortDateTime`.
    pub const fn from_letter(letter: char) -> Self {
        match letter {
            'R' => Self::RelativeTime,
            'T' => Self::LongTime,
            't' => Self::ShortTime,
            'd' => Self::ShortDate,
            'D' => Self::LongDate,
            'F' => Self::LongDateTime,
            _ => Self::ShortDateTime,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Self::RelativeTime => 'R',
            Self::LongTime => 'T',
            Self::ShortTime => 't',
            Self::ShortDate => 'd',
            Self::LongDate => 'D',
            Self::ShortDateTime => 'f',
            Self::LongDateTime => 'F',
        }
    }
}

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Format `timestamp` relative to `now` (both unix seconds).
///
/// Picks the largest whole unit: `"3 days ago"`, `"in 1 hour"`.
pub fn format_relative(timestamp: u64, now: u64) -> String {
    let past = now > timestamp;
    let diff = now.abs_diff(timestamp);

    let (value, unit) = [
        (YEAR, "year"),
        (MONTH, "month"),
        (DAY, "day"),
        (HOUR, "hour"),
        (MINUTE, "minute"),
    ]
    .into_iter()
    .find(|&(size, _)| diff >= size)
    .map_or((diff, "second"), |(size, unit)| (diff / size, unit));

    let plural = if value == 1 { "" } else { "s" };
    if past {
        format!("{value} {unit}{plural} ago")
    } else {
        format!("in {value} {unit}{plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_letter_maps_every_style() {
        for style in [
            TimestampStyle::RelativeTime,
            TimestampStyle::LongTime,
            TimestampStyle::ShortTime,
            TimestampStyle::ShortDate,
            TimestampStyle::LongDate,
            TimestampStyle::ShortDateTime,
            TimestampStyle::LongDateTime,
        ] {
            assert_eq!(TimestampStyle::from_letter(style.letter()), style);
        }
    }

    #[test]
    fn test_unknown_letter_defaults_to_short_date_time() {
        assert_eq!(TimestampStyle::from_letter('z'), TimestampStyle::ShortDateTime);
        assert_eq!(TimestampStyle::from_letter('r'), TimestampStyle::ShortDateTime);
    }

    #[test]
    fn test_format_relative_past() {
        assert_eq!(format_relative(1_000, 1_000 + 3 * DAY + 5), "3 days ago");
        assert_eq!(format_relative(1_000, 1_000 + HOUR), "1 hour ago");
        assert_eq!(format_relative(0, 2 * YEAR), "2 years ago");
        assert_eq!(format_relative(0, 45 * DAY), "1 month ago");
    }

    #[test]
    fn test_format_relative_future() {
        assert_eq!(format_relative(1_000 + 90, 1_000), "in 1 minute");
        assert_eq!(format_relative(1_000 + 30, 1_000), "in 30 seconds");
    }

    #[test]
    fn test_format_relative_same_instant() {
        assert_eq!(format_relative(500, 500), "in 0 seconds");
    }
}
