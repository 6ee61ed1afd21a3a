//! Locale table and locale-specific number layout.

use serde::{Deserialize, Serialize};

use super::currencies::en_us_symbol;

/// Locales a currency can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "ja-JP")]
    JaJp,
}

const NBSP: char = '\u{a0}';

impl Locale {
    /// Locale used for a normalized currency code.
    pub fn for_currency(code: &str) -> Self {
        match code {
            "GBP" => Self::EnGb,
            "JPY" => Self::JaJp,
            "EUR" => Self::DeDe,
            _ => Self::EnUs,
        }
    }

    /// BCP 47 tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::DeDe => "de-DE",
            Self::JaJp => "ja-JP",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "en-US" => Some(Self::EnUs),
            "en-GB" => Some(Self::EnGb),
            "de-DE" => Some(Self::DeDe),
            "ja-JP" => Some(Self::JaJp),
            _ => None,
        }
    }

    pub fn group_separator(&self) -> char {
        match self {
            Self::DeDe => '.',
            _ => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Self::DeDe => ',',
            _ => '.',
        }
    }

    /// Currency symbol this locale displays for `code`, if it knows the code.
    ///
    /// Only the pairing produced by [`Locale::for_currency`] is covered, so
    /// every locale but ja-JP shows the en-US symbol.
    pub fn symbol(&self, code: &str) -> Option<&'static str> {
        match (self, code) {
            (Self::JaJp, "JPY") => Some("￥"),
            _ => en_us_symbol(code),
        }
    }

    /// Place `symbol` around an already laid-out number.
    pub(crate) fn decorate(&self, negative: bool, symbol: &str, number: &str) -> String {
        let sign = if negative { "-" } else { "" };
        let spaced = symbol.chars().all(|c| c.is_ascii_alphabetic());
        match self {
            Self::DeDe => format!("{sign}{number}{NBSP}{symbol}"),
            _ if spaced => format!("{sign}{symbol}{NBSP}{number}"),
            _ => format!("{sign}{symbol}{number}"),
        }
    }

    /// Lay out an unsigned decimal string ("1234.5") with grouping and this
    /// locale's decimal separator.
    pub(crate) fn layout(&self, digits: &str) -> String {
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        let len = int_part.len();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push(self.group_separator());
            }
            grouped.push(c);
        }

        match frac_part {
            Some(f) if !f.is_empty() => format!("{grouped}{}{f}", self.decimal_separator()),
            _ => grouped,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
