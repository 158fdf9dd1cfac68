//! Quality label parsing.
//!
//! Catalog quality strings are free text ("1080", "1080p60", "4k", "Up to HD",
//! "unknown"). [`QualityLabel::parse`] normalizes them into the display labels
//! the player groups by, and [`QualityLabel::rank`] gives each a pixel-height
//! equivalent for ordering.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Rank assigned to the generic "HD" label. It is not derived from digits.
pub const HD_RANK: u32 = 720;

/// Normalized display label of a source's quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityLabel {
    /// Generic "HD" with no explicit resolution.
    Hd,
    P1080,
    Uhd4k,
    Qhd2k,
    P720,
    P480,
    P360,
    /// Unknown or unparsable quality.
    Sd,
    /// A resolution outside the known tiers, e.g. `540p`.
    Other(u32),
}

/// Fixed group ordering for recognized labels.
///
/// "HD" deliberately precedes the numeric tiers and "1080p" precedes "4K";
/// the quality menu has always been presented in this order.
const PRECEDENCE: [QualityLabel; 8] = [
    QualityLabel::Hd,
    QualityLabel::P1080,
    QualityLabel::Uhd4k,
    QualityLabel::Qhd2k,
    QualityLabel::P720,
    QualityLabel::P480,
    QualityLabel::P360,
    QualityLabel::Sd,
];

impl QualityLabel {
    /// Parse a free-text quality string. Never fails; garbage becomes `Sd`.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        if lower.is_empty() || lower == "unknown" {
            return Self::Sd;
        }

        let has_digit = lower.chars().any(|c| c.is_ascii_digit());
        if lower.contains("up to hd") || lower == "hd" || (lower.contains("hd") && !has_digit) {
            return Self::Hd;
        }

        let digits: String = lower.chars().filter(char::is_ascii_digit).collect();
        if digits.contains("2160") || lower.contains("4k") {
            Self::Uhd4k
        } else if digits.contains("1440") || lower.contains("2k") {
            Self::Qhd2k
        } else if digits.contains("1080") {
            Self::P1080
        } else if digits.contains("720") {
            Self::P720
        } else if digits.contains("480") {
            Self::P480
        } else if digits.contains("360") {
            Self::P360
        } else {
            first_number(&lower)
                .filter(|n| *n > 0)
                .map_or(Self::Sd, Self::Other)
        }
    }

    /// Pixel-height equivalent used for ordering. `Sd` ranks 0.
    pub fn rank(&self) -> u32 {
        match self {
            Self::Hd => HD_RANK,
            Self::P1080 => 1080,
            Self::Uhd4k => 2160,
            Self::Qhd2k => 1440,
            Self::P720 => 720,
            Self::P480 => 480,
            Self::P360 => 360,
            Self::Sd => 0,
            Self::Other(n) => *n,
        }
    }

    /// Position in the fixed precedence table, if the label is recognized.
    pub fn precedence(&self) -> Option<usize> {
        PRECEDENCE.iter().position(|l| l == self)
    }

    /// Group ordering: recognized labels by the precedence table first, then
    /// everything else by descending numeric rank.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        match (self.precedence(), other.precedence()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => other.rank().cmp(&self.rank()),
        }
    }

    /// Whether a persisted label (e.g. `"1080p"`, `"4k"`) names this label.
    pub fn matches(&self, label: &str) -> bool {
        self.to_string().eq_ignore_ascii_case(label.trim())
    }
}

/// The first run of ASCII digits in `s`, if it fits a `u32`.
fn first_number(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let run: String = s[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    run.parse().ok()
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hd => write!(f, "HD"),
            Self::P1080 => write!(f, "1080p"),
            Self::Uhd4k => write!(f, "4K"),
            Self::Qhd2k => write!(f, "2K"),
            Self::P720 => write!(f, "720p"),
            Self::P480 => write!(f, "480p"),
            Self::P360 => write!(f, "360p"),
            Self::Sd => write!(f, "SD"),
            Self::Other(n) => write!(f, "{n}p"),
        }
    }
}

impl Serialize for QualityLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(raw: &str) -> String {
        QualityLabel::parse(raw).to_string()
    }

    #[test]
    fn explicit_tiers() {
        assert_eq!(label("4k"), "4K");
        assert_eq!(label("2160p"), "4K");
        assert_eq!(label("2K"), "2K");
        assert_eq!(label("1440"), "2K");
        assert_eq!(label("1080"), "1080p");
        assert_eq!(label("1080p60"), "1080p");
        assert_eq!(label("720p"), "720p");
        assert_eq!(label("480"), "480p");
        assert_eq!(label("360p"), "360p");
    }

    #[test]
    fn generic_hd_is_not_numeric() {
        assert_eq!(QualityLabel::parse("HD"), QualityLabel::Hd);
        assert_eq!(QualityLabel::parse("Up to HD"), QualityLabel::Hd);
        assert_eq!(QualityLabel::parse("FullHD"), QualityLabel::Hd);
        // Digits win over the "hd" substring.
        assert_eq!(QualityLabel::parse("HD 1080"), QualityLabel::P1080);
    }

    #[test]
    fn unparsable_is_sd() {
        assert_eq!(QualityLabel::parse(""), QualityLabel::Sd);
        assert_eq!(QualityLabel::parse("unknown"), QualityLabel::Sd);
        assert_eq!(QualityLabel::parse("auto"), QualityLabel::Sd);
        assert_eq!(QualityLabel::parse("0"), QualityLabel::Sd);
        assert_eq!(QualityLabel::parse("99999999999"), QualityLabel::Sd);
        assert_eq!(QualityLabel::Sd.rank(), 0);
    }

    #[test]
    fn other_digit_runs_keep_their_value() {
        assert_eq!(QualityLabel::parse("540"), QualityLabel::Other(540));
        assert_eq!(label("540"), "540p");
        assert_eq!(QualityLabel::parse("240p").rank(), 240);
    }

    #[test]
    fn precedence_table_order() {
        let mut labels = vec![
            QualityLabel::Sd,
            QualityLabel::Uhd4k,
            QualityLabel::Other(540),
            QualityLabel::P1080,
            QualityLabel::Other(900),
            QualityLabel::Hd,
        ];
        labels.sort_by(|a, b| a.display_cmp(b));
        let shown: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        assert_eq!(shown, ["HD", "1080p", "4K", "SD", "900p", "540p"]);
    }

    #[test]
    fn matches_is_case_insensitive() {
        assert!(QualityLabel::Uhd4k.matches("4k"));
        assert!(QualityLabel::P1080.matches("1080p"));
        assert!(!QualityLabel::P1080.matches("1080"));
    }

    #[test]
    fn serializes_as_display_string() {
        assert_eq!(
            serde_json::to_string(&QualityLabel::Other(540)).unwrap(),
            "\"540p\""
        );
    }
}
