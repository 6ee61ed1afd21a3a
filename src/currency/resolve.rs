//! Currency code normalization and first-match resolution.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::currencies::minor_unit_digits;
use super::locale::Locale;

/// Code used when nothing else resolves, or a code is malformed.
pub const FALLBACK_CURRENCY: &str = "USD";

/// A currency record as stored for an organization.
///
/// `code` may be tenant-scoped ("USD_3", "EUR_CORE"); use
/// [`Currency::normalized_code`] before handing it to a formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Currency {
    pub fn new(code: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            symbol: symbol.into(),
            is_default: false,
        }
    }

    /// Mark as the organization's default currency.
    pub fn default_currency(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn normalized_code(&self) -> String {
        normalize_currency_code(&self.code)
    }
}

/// Normalize a possibly tenant-scoped code to a 3-letter ISO code.
///
/// Everything from the first underscore on is dropped ("USD_3" → "USD").
/// A result that is not exactly 3 characters becomes [`FALLBACK_CURRENCY`].
pub fn normalize_currency_code(code: &str) -> String {
    normalize_currency_code_or(code, FALLBACK_CURRENCY)
}

/// Like [`normalize_currency_code`] with a caller-chosen fallback.
pub fn normalize_currency_code_or(code: &str, fallback: &str) -> String {
    let trimmed = code.trim();
    let prefix = trimmed.split('_').next().unwrap_or_default();
    if prefix.chars().count() == 3 {
        return prefix.to_ascii_uppercase();
    }
    warn!(code, fallback, "malformed currency code, using fallback");
    fallback.to_string()
}

/// Resolve the active currency code, first match wins:
///
/// 1. `explicit`, if non-empty
/// 2. the currency in `available` flagged `is_default`
/// 3. `cached_default`
/// 4. [`FALLBACK_CURRENCY`]
///
/// The winner is normalized; it does not fall through to the next source if
/// malformed.
pub fn resolve_currency(
    explicit: Option<&str>,
    available: &[Currency],
    cached_default: Option<&Currency>,
) -> String {
    resolve_currency_with(explicit, available, cached_default, FALLBACK_CURRENCY)
}

/// Like [`resolve_currency`] with a caller-chosen hard fallback.
pub fn resolve_currency_with(
    explicit: Option<&str>,
    available: &[Currency],
    cached_default: Option<&Currency>,
    fallback: &str,
) -> String {
    let non_empty = |code: &str| !code.trim().is_empty();

    let chosen = explicit
        .filter(|code| non_empty(code))
        .or_else(|| {
            available
                .iter()
                .find(|c| c.is_default && non_empty(&c.code))
                .map(|c| c.code.as_str())
        })
        .or_else(|| {
            cached_default
                .filter(|c| non_empty(&c.code))
                .map(|c| c.code.as_str())
        });

    match chosen {
        Some(code) => normalize_currency_code_or(code, fallback),
        None => fallback.to_string(),
    }
}

/// Everything the formatter needs to know about a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCurrency {
    /// 3-letter ISO code.
    pub normalized_code: String,
    pub locale: Locale,
    /// 0 or 2.
    pub minor_unit_digits: u32,
}

impl ResolvedCurrency {
    /// Derive locale and digits from a (possibly tenant-scoped) code.
    pub fn from_code(code: &str) -> Self {
        let normalized_code = normalize_currency_code(code);
        Self {
            locale: Locale::for_currency(&normalized_code),
            minor_unit_digits: minor_unit_digits(&normalized_code),
            normalized_code,
        }
    }

    /// Resolve with [`resolve_currency`] and derive locale and digits.
    pub fn resolve(
        explicit: Option<&str>,
        available: &[Currency],
        cached_default: Option<&Currency>,
    ) -> Self {
        Self::from_code(&resolve_currency(explicit, available, cached_default))
    }
}

/// The organization's default currency, from its currency list or the
/// separately cached default.
pub fn resolve_default_currency(
    available: &[Currency],
    cached_default: Option<&Currency>,
) -> ResolvedCurrency {
    ResolvedCurrency::resolve(None, available, cached_default)
}
