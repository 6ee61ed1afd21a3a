//! Locale-correct currency rendering with a plain-symbol fallback.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use super::currencies::{fallback_symbol, is_known_currency_code};
use super::resolve::ResolvedCurrency;
use crate::core::round_half_up;

/// Placeholder rendered for missing or non-numeric amounts.
pub const MISSING_AMOUNT: &str = "-";

/// Locale-aware formatting could not render an amount.
///
/// Never surfaced by [`format_currency`]; it falls back to the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// Code is well-formed but not a currency the locale formatter knows.
    #[error("unsupported currency code '{0}'")]
    UnsupportedCurrency(String),

    /// Code is not a 3-letter code at all.
    #[error("malformed currency code '{0}'")]
    MalformedCode(String),
}

/// An amount as it may arrive from a form, a record, or a computation.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Decimal(Decimal),
    Float(f64),
    Text(String),
    Missing,
}

impl AmountInput {
    /// The numeric value, or `None` for missing, NaN, infinite, or
    /// unparsable input.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Float(f) if f.is_finite() => Decimal::try_from(*f).ok(),
            Self::Float(_) => None,
            Self::Text(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .ok()
            }
            Self::Missing => None,
        }
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&Decimal> for AmountInput {
    fn from(value: &Decimal) -> Self {
        Self::Decimal(*value)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for AmountInput {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        Self::Decimal(Decimal::from(value))
    }
}

impl From<i32> for AmountInput {
    fn from(value: i32) -> Self {
        Self::Decimal(Decimal::from(value))
    }
}

impl From<u32> for AmountInput {
    fn from(value: u32) -> Self {
        Self::Decimal(Decimal::from(value))
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<AmountInput>> From<Option<T>> for AmountInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Render `amount` in the currency identified by `code`.
///
/// `code` may be tenant-scoped or absent; absent means the fallback
/// currency. Missing or non-numeric amounts render as `"-"`. Never fails.
///
/// ```
/// use pricebook::currency::format_currency;
///
/// assert_eq!(format_currency(1234.5, Some("USD")), "$1,234.50");
/// assert_eq!(format_currency(9.99, Some("JPY_CORE")), "￥10");
/// assert_eq!(format_currency(None::<f64>, Some("USD")), "-");
/// ```
pub fn format_currency(amount: impl Into<AmountInput>, code: Option<&str>) -> String {
    let resolved = ResolvedCurrency::resolve(code, &[], None);
    format_resolved(amount, &resolved)
}

/// Render `amount` with an already resolved currency.
pub fn format_resolved(amount: impl Into<AmountInput>, currency: &ResolvedCurrency) -> String {
    let Some(value) = amount.into().to_decimal() else {
        return MISSING_AMOUNT.to_string();
    };

    match format_localized(value, currency) {
        Ok(s) => s,
        Err(e) => {
            debug!(
                error = %e,
                code = %currency.normalized_code,
                "locale formatting failed, using symbol fallback"
            );
            format_fallback(value, &currency.normalized_code, currency.minor_unit_digits)
        }
    }
}

/// Strict locale formatting. Fails for codes the locale formatter does not
/// support.
pub fn format_localized(
    value: Decimal,
    currency: &ResolvedCurrency,
) -> Result<String, FormatError> {
    let code = currency.normalized_code.as_str();
    if code.chars().count() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FormatError::MalformedCode(code.to_string()));
    }
    if !is_known_currency_code(code) {
        return Err(FormatError::UnsupportedCurrency(code.to_string()));
    }

    let locale = currency.locale;
    let symbol = locale
        .symbol(code)
        .ok_or_else(|| FormatError::UnsupportedCurrency(code.to_string()))?;

    let (negative, digits) = fixed(value, currency.minor_unit_digits);

    Ok(locale.decorate(negative, symbol, &locale.layout(&digits)))
}

/// `<symbol><amount>` with exactly `digits` fraction digits and no grouping.
pub fn format_fallback(value: Decimal, code: &str, digits: u32) -> String {
    let (negative, number) = fixed(value, digits);
    let sign = if negative { "-" } else { "" };
    format!("{}{sign}{number}", fallback_symbol(code))
}

/// Round half away from zero and render the magnitude with exactly `digits`
/// fraction digits. Returns whether the rounded value is below zero.
///
/// Padding is done on the text: near the edge of `Decimal`'s range the scale
/// cannot be raised far enough to carry the trailing zeros.
fn fixed(value: Decimal, digits: u32) -> (bool, String) {
    let rounded = round_half_up(value, digits);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let digits = digits as usize;
    let mut out = String::with_capacity(int_part.len() + digits + 1);
    out.push_str(int_part);
    if digits > 0 {
        out.push('.');
        out.push_str(frac_part);
        out.extend(std::iter::repeat_n('0', digits.saturating_sub(frac_part.len())));
    }
    (negative, out)
}

/// Normalize `code` and render `value` via the symbol fallback.
pub fn format_plain(value: Decimal, code: &str) -> String {
    let resolved = ResolvedCurrency::from_code(code);
    format_fallback(value, &resolved.normalized_code, resolved.minor_unit_digits)
}
